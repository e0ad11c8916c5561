//! # dukaan-core: Pure Checkout Logic for Dukaan
//!
//! This crate is the **heart** of the Dukaan checkout. It contains the whole
//! checkout state machine as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Dukaan Checkout Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                       Hosting UI                                 │   │
//! │  │    Product Popup ──► Checkout Modal ──► Card Form ──► Receipt   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                dukaan-client (Flow Controller)                   │   │
//! │  │    proceed, submit_card_payment, create order, add payment      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ dukaan-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ checkout  │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │  Session  │  │   rules   │  │   │
//! │  │   │  LineItem │  │  totals   │  │   Step    │  │  messages │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO SESSION STORAGE • PURE FUNCTIONS    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, LineItem, PaymentMethod, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`checkout`] - The checkout session state machine
//! - [`error`] - Validation error types with user-facing messages
//! - [`validation`] - Card / delivery / quantity validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every transition is deterministic - same input = same output
//! 2. **No I/O**: Network, session storage, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are whole rupees (i64), no float errors
//! 4. **Explicit States**: The checkout step is an enum, never a string
//!
//! ## Example Usage
//!
//! ```rust
//! use dukaan_core::checkout::{CheckoutSession, Step};
//! use dukaan_core::types::{PaymentMethod, Product};
//!
//! let product = Product {
//!     id: "p-1".into(),
//!     name: "Kettle".into(),
//!     price: 1000,
//!     stock_quantity: 5,
//!     image_base64: None,
//! };
//!
//! let mut session = CheckoutSession::for_product(&product, 2);
//! assert_eq!(session.subtotal().rupees(), 2000);
//! assert_eq!(session.total().rupees(), 2350); // subtotal + delivery fee
//!
//! session.select_method(PaymentMethod::Cash);
//! assert_eq!(session.proceed(), Step::Processing);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use dukaan_core::Money` instead of
// `use dukaan_core::money::Money`

pub use checkout::{CheckoutSession, Step, SuccessData};
pub use error::ValidationError;
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Flat delivery fee added to every order, in rupees.
///
/// ## Why a constant?
/// The backend does not quote delivery fees; the storefront charges a flat
/// Rs. 350 per order and the payment amount must include it. Can be made
/// configurable per-store in future versions.
pub const DELIVERY_FEE: Money = Money::from_rupees(350);

/// Minimum quantity for a line item.
///
/// A line item with zero quantity does not exist; removing the last unit is
/// the host's job (close the checkout), not the session's.
pub const MIN_QUANTITY: i64 = 1;
