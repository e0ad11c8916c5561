//! # Domain Types
//!
//! Core domain types used throughout the Dukaan checkout.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    LineItem     │   │ DeliveryDetails │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (_id)       │   │  product_id     │   │  address        │       │
//! │  │  price          │   │  unit_price     │   │  city           │       │
//! │  │  stock_quantity │   │  quantity       │   │  postal_code    │       │
//! │  └─────────────────┘   │  stock_available│   │  phone_number   │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  CardDetails    │   │ PaymentMethod   │   │ PaymentStatus   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  card_number    │   │  Card           │   │  Completed      │       │
//! │  │  card_holder    │   │  Cash           │   │  Pending        │       │
//! │  │  expiry / cvv   │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! All identifiers (`_id` on products, orders, payments) are issued by the
//! backend and handled here as opaque strings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::MIN_QUANTITY;

// =============================================================================
// Product
// =============================================================================

/// A product as delivered by the catalog/cart endpoints.
///
/// Only the fields the checkout reads are modeled; the catalog carries more
/// (category, description, ...) but none of it affects order submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Backend identifier.
    #[serde(rename = "_id")]
    pub id: String,

    /// Display name shown in the checkout summary.
    pub name: String,

    /// Unit price in rupees.
    pub price: i64,

    /// Units currently in stock. Quantity selection is clamped to this.
    pub stock_quantity: i64,

    /// Inline image for the checkout summary, if the catalog has one.
    #[serde(default)]
    pub image_base64: Option<String>,
}

impl Product {
    /// Returns the unit price as a Money type.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_rupees(self.price)
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// A product/quantity/price tuple attached to the checkout session.
///
/// Uses the snapshot pattern: name and price are frozen at the moment the
/// item enters checkout, so a catalog update mid-checkout cannot change what
/// the customer is charged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    /// Product ID (backend `_id`).
    pub product_id: String,

    /// Product name at time of entering checkout (frozen).
    pub name: String,

    /// Unit price at time of entering checkout (frozen).
    pub unit_price: Money,

    /// Stock level at time of entering checkout; the quantity upper bound.
    pub stock_available: i64,

    /// Selected quantity. Invariant: `1 <= quantity <= stock_available`.
    pub quantity: i64,

    /// When this item entered checkout.
    pub added_at: DateTime<Utc>,
}

impl LineItem {
    /// Creates a line item from a product and a requested quantity.
    ///
    /// The requested quantity is clamped into `[1, stock_available]` so the
    /// invariant holds from birth. A product with zero stock still yields a
    /// quantity of 1; the backend rejects the order at submission in that
    /// case, which is the only stock authority anyway.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        LineItem {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.unit_price(),
            stock_available: product.stock_quantity,
            quantity: quantity.clamp(MIN_QUANTITY, product.stock_quantity.max(MIN_QUANTITY)),
            added_at: Utc::now(),
        }
    }

    /// Calculates the line total (unit price × quantity).
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// Sets the quantity if it is within `[1, stock_available]`.
    ///
    /// Out-of-range input is rejected silently (the previous value is kept),
    /// matching the quantity field in the checkout UI: typing "0" or "999"
    /// simply does not take.
    pub fn set_quantity(&mut self, quantity: i64) {
        if quantity >= MIN_QUANTITY && quantity <= self.stock_available {
            self.quantity = quantity;
        }
    }

    /// Increments the quantity, saturating at the available stock.
    pub fn increment(&mut self) {
        if self.quantity < self.stock_available {
            self.quantity += 1;
        }
    }

    /// Decrements the quantity, saturating at 1.
    pub fn decrement(&mut self) {
        if self.quantity > MIN_QUANTITY {
            self.quantity -= 1;
        }
    }
}

// =============================================================================
// Delivery Details
// =============================================================================

/// Delivery information collected in the cart checkout variant.
///
/// All four fields are required before proceeding; beyond presence there is
/// no format validation (the backend stores them verbatim).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeliveryDetails {
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub phone_number: String,
}

impl DeliveryDetails {
    /// Renders the single-string delivery address the order endpoint takes:
    /// `"{address}, {city}, {postal_code}"`.
    pub fn combined_address(&self) -> String {
        format!("{}, {}, {}", self.address, self.city, self.postal_code)
    }
}

// =============================================================================
// Card Details
// =============================================================================

/// Card fields collected on the card-payment step.
///
/// These exist only while the session is on the card step and are never sent
/// to the backend - validation is format-shape checking only, no gateway.
#[derive(Debug, Clone, Default)]
pub struct CardDetails {
    pub card_number: String,
    pub card_holder: String,
    pub expiry_date: String,
    pub cvv: String,
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer pays.
///
/// The serde names are the exact strings the payment endpoint expects in
/// `payment_method`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Credit/debit card, collected in the card step.
    Card,
    /// Cash on delivery.
    Cash,
}

impl PaymentMethod {
    /// The payment status recorded at order time for this method.
    ///
    /// Card payments are marked `Completed` immediately (no real gateway);
    /// cash stays `Pending` until the courier collects.
    pub const fn settlement_status(&self) -> PaymentStatus {
        match self {
            PaymentMethod::Card => PaymentStatus::Completed,
            PaymentMethod::Cash => PaymentStatus::Pending,
        }
    }
}

// =============================================================================
// Payment Status
// =============================================================================

/// Payment settlement state, as the backend spells it in `payment_status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Completed,
    Pending,
}

// =============================================================================
// Server Records
// =============================================================================

/// The order record returned by `POST /api/order/create`.
///
/// Only `_id` is needed to chain the payment call; everything else the
/// backend returns is retained untouched for the host's success screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// The payment record returned by `POST /api/payment/add`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    #[serde(rename = "_id")]
    pub id: String,

    pub payment_method: PaymentMethod,

    pub amount: Money,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// =============================================================================
// Unit Tests
// =============================================================================
