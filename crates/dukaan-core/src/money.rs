//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Rupees                                           │
//! │    The backend prices everything in whole rupees (Rs. 1,000 etc.),     │
//! │    so every amount in the system is an i64 rupee count. Subtotals,     │
//! │    delivery fee, and payment amounts never touch a float.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use dukaan_core::money::Money;
//!
//! // Create from rupees
//! let price = Money::from_rupees(1000); // Rs. 1,000
//!
//! // Arithmetic operations
//! let doubled = price * 2;                      // Rs. 2,000
//! let total = doubled + Money::from_rupees(350); // Rs. 2,350
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in whole rupees.
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for refunds, adjustments
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Transparent serde**: Serializes as a bare number, which is exactly
///   what the backend's `price`, `subtotal_price`, and `amount` fields carry
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► LineItem.unit_price ──► LineItem.line_total()
///                                                 │
///      Session.subtotal() ◄──────────────────────┘
///            │
///            ▼
///      Session.total() = subtotal + DELIVERY_FEE ──► payment amount
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole rupees.
    ///
    /// ## Example
    /// ```rust
    /// use dukaan_core::money::Money;
    ///
    /// let price = Money::from_rupees(1000);
    /// assert_eq!(price.rupees(), 1000);
    /// ```
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees)
    }

    /// Returns the value in rupees.
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use dukaan_core::money::Money;
    ///
    /// let unit_price = Money::from_rupees(1000);
    /// let line_total = unit_price.multiply_quantity(2);
    /// assert_eq!(line_total.rupees(), 2000);
    /// ```
    ///
    /// ## User Workflow
    /// ```text
    /// Product: Kettle Rs. 1,000
    /// Quantity: 2
    ///      │
    ///      ▼
    /// multiply_quantity(2) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Line Total: Rs. 2,000
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money the way the storefront renders it:
/// `Rs. 2,350` with thousands separators.
///
/// ## Note
/// This is for debugging and receipts. Use frontend formatting for actual
/// UI display to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}Rs. {}", sign, group_thousands(self.0.unsigned_abs()))
    }
}

/// Groups digits in threes: 2350 -> "2,350".
fn group_thousands(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut groups = Vec::new();
    while value > 0 {
        groups.push((value % 1000) as u16);
        value /= 1000;
    }
    let mut out = groups.pop().map(|g| g.to_string()).unwrap_or_default();
    while let Some(g) = groups.pop() {
        out.push_str(&format!(",{:03}", g));
    }
    out
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
        Money(self.0 * qty as i64)
    }
}

/// Multiplication by i64.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rupees() {
        let money = Money::from_rupees(1000);
        assert_eq!(money.rupees(), 1000);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_rupees(2350)), "Rs. 2,350");
        assert_eq!(format!("{}", Money::from_rupees(350)), "Rs. 350");
        assert_eq!(format!("{}", Money::from_rupees(1234567)), "Rs. 1,234,567");
        assert_eq!(format!("{}", Money::from_rupees(-550)), "-Rs. 550");
        assert_eq!(format!("{}", Money::from_rupees(0)), "Rs. 0");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_rupees(1000);
        let b = Money::from_rupees(500);

        assert_eq!((a + b).rupees(), 1500);
        assert_eq!((a - b).rupees(), 500);
        let result: Money = a * 3;
        assert_eq!(result.rupees(), 3000);
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_rupees(1000);
        let line_total = unit_price.multiply_quantity(2);
        assert_eq!(line_total.rupees(), 2000);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let positive = Money::from_rupees(100);
        assert!(positive.is_positive());

        let negative = Money::from_rupees(-100);
        assert!(negative.is_negative());
    }

    #[test]
    fn test_serializes_as_bare_number() {
        // The backend's `amount` and `subtotal_price` fields are plain JSON
        // numbers; Money must round-trip as one.
        let money = Money::from_rupees(2350);
        assert_eq!(serde_json::to_string(&money).unwrap(), "2350");
        let back: Money = serde_json::from_str("2350").unwrap();
        assert_eq!(back, money);
    }
}
