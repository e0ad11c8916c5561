//! # Validation Module
//!
//! Form validation for the checkout steps.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: THIS MODULE (format-shape checks)                            │
//! │  ├── Required fields, minimum lengths                                  │
//! │  ├── Fixed check order - first failing field's message wins            │
//! │  └── No network call is ever issued on failure                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Backend (the only real authority)                            │
//! │  ├── Stock checks, price checks                                        │
//! │  └── Rejections surface as server messages in the session              │
//! │                                                                         │
//! │  Card details are NEVER validated against a payment network - this     │
//! │  storefront collects them and checks shape only.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use dukaan_core::types::CardDetails;
//! use dukaan_core::validation::validate_card_details;
//!
//! let card = CardDetails {
//!     card_number: "4111111111111111".into(),
//!     card_holder: "Ali Raza".into(),
//!     expiry_date: "12/27".into(),
//!     cvv: "123".into(),
//! };
//! assert!(validate_card_details(&card).is_ok());
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::types::{CardDetails, DeliveryDetails};

/// Minimum card number length accepted by the card step.
pub const MIN_CARD_NUMBER_LEN: usize = 16;

/// Minimum CVV length accepted by the card step.
pub const MIN_CVV_LEN: usize = 3;

// =============================================================================
// Card Validation
// =============================================================================

/// Validates card payment details.
///
/// ## Rules (checked in this order, first failure wins)
/// - card number: required, length >= 16
/// - card holder: required, non-empty
/// - expiry date: required, non-empty (no date-format or expiry check)
/// - CVV: required, length >= 3
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Card Step: Pay & Place Order                                           │
/// │                                                                         │
/// │  validate_card_details(card) ← THIS FUNCTION                           │
/// │       │                                                                 │
/// │       ├── number < 16 chars? → "Please enter a valid card number"      │
/// │       ├── holder empty?      → "Please enter the card holder name"     │
/// │       ├── expiry empty?      → "Please enter the expiry date"          │
/// │       ├── cvv < 3 chars?     → "Please enter a valid CVV"              │
/// │       │                                                                 │
/// │       └── OK → session enters Processing                               │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_card_details(card: &CardDetails) -> ValidationResult<()> {
    if card.card_number.len() < MIN_CARD_NUMBER_LEN {
        return Err(ValidationError::CardNumber);
    }

    if card.card_holder.is_empty() {
        return Err(ValidationError::CardHolder);
    }

    if card.expiry_date.is_empty() {
        return Err(ValidationError::ExpiryDate);
    }

    if card.cvv.len() < MIN_CVV_LEN {
        return Err(ValidationError::Cvv);
    }

    Ok(())
}

// =============================================================================
// Delivery Validation
// =============================================================================

/// Validates delivery details (cart checkout variant only).
///
/// ## Rules
/// All four fields are required, checked in a fixed order: address, city,
/// postal code, phone number. The first missing field's message wins. There
/// is no further format validation.
pub fn validate_delivery_details(delivery: &DeliveryDetails) -> ValidationResult<()> {
    if delivery.address.is_empty() {
        return Err(ValidationError::DeliveryAddress);
    }

    if delivery.city.is_empty() {
        return Err(ValidationError::City);
    }

    if delivery.postal_code.is_empty() {
        return Err(ValidationError::PostalCode);
    }

    if delivery.phone_number.is_empty() {
        return Err(ValidationError::PhoneNumber);
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
