//! # Error Types
//!
//! Validation error types for dukaan-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  dukaan-core errors (this file)                                         │
//! │  └── ValidationError  - form/input checks, one variant per message     │
//! │                                                                         │
//! │  dukaan-client errors (separate crate)                                  │
//! │  └── ClientError      - HTTP/auth/API failures                         │
//! │                                                                         │
//! │  Flow: ValidationError ──► session error overlay ──► rendered inline   │
//! │        ClientError     ──► user_message()          ──► rendered inline │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. The `#[error]` string IS the user-facing message, verbatim - the
//!    checkout renders these inline, so wording is part of the contract
//! 3. Errors are enum variants, never bare Strings

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors, one variant per user-facing message.
///
/// The checkout shows the first failing field's message and stops, so the
/// caller checks fields in a fixed order (see [`crate::validation`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    // =========================================================================
    // Card fields (checked in this order)
    // =========================================================================
    /// Card number missing or shorter than 16 characters.
    #[error("Please enter a valid card number")]
    CardNumber,

    /// Card holder name missing.
    #[error("Please enter the card holder name")]
    CardHolder,

    /// Expiry date missing (format is not checked).
    #[error("Please enter the expiry date")]
    ExpiryDate,

    /// CVV missing or shorter than 3 characters.
    #[error("Please enter a valid CVV")]
    Cvv,

    // =========================================================================
    // Delivery fields (checked in this order)
    // =========================================================================
    #[error("Please enter your delivery address")]
    DeliveryAddress,

    #[error("Please enter your city")]
    City,

    #[error("Please enter your postal code")]
    PostalCode,

    #[error("Please enter your phone number")]
    PhoneNumber,

    // =========================================================================
    // Checkout step
    // =========================================================================
    /// Proceed was triggered with no payment method selected.
    #[error("Please select a payment method")]
    PaymentMethodMissing,
}

/// Convenience type alias for validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
