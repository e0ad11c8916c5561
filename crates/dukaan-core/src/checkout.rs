//! # Checkout Session
//!
//! The checkout state machine. One session per checkout attempt.
//!
//! ## Step Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Steps                                       │
//! │                                                                         │
//! │  ┌──────────┐ proceed ┌─────────────┐ submit  ┌────────────┐           │
//! │  │ Checkout │────────►│ CardPayment │────────►│ Processing │           │
//! │  │          │ (card)  │             │ (valid) │            │           │
//! │  └────┬─────┘◄────────└─────────────┘         └─────┬──────┘           │
//! │       │        back         ▲                        │                  │
//! │       │ proceed (cash)      │ submission failed      │ both calls ok    │
//! │       └─────────────────────┼────────────────────────▼                  │
//! │                             │                  ┌──────────┐             │
//! │       submission failed ────┘                  │ Success  │ (terminal)  │
//! │       (method = card)                          └──────────┘             │
//! │                                                                         │
//! │  Errors are an overlay on Checkout/CardPayment, not a separate state.  │
//! │  Processing renders no controls, so it accepts no user input.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! The session is owned exclusively by its flow controller; there is exactly
//! one writer. Discard it when the checkout closes - sessions are never
//! reused across attempts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{CardDetails, DeliveryDetails, LineItem, Order, Payment, PaymentMethod, Product};
use crate::validation::{validate_card_details, validate_delivery_details};
use crate::DELIVERY_FEE;

// =============================================================================
// Step
// =============================================================================

/// The single active step of a checkout session.
///
/// Serde names match what the hosting UI switches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Step {
    /// Quantity and payment-method selection (plus delivery form in the
    /// cart variant).
    Checkout,
    /// Card detail collection. Reached only when the method is Card.
    CardPayment,
    /// Submission in flight; no interactive controls.
    Processing,
    /// Terminal. Order and payment records are stored on the session.
    Success,
}

// =============================================================================
// Success Data
// =============================================================================

/// Both server records, retained after a successful submission for the
/// host's success screen (order id, payment method, amount).
#[derive(Debug, Clone)]
pub struct SuccessData {
    pub order: Order,
    pub payment: Payment,
}

// =============================================================================
// Checkout Session
// =============================================================================

/// The aggregate root of one checkout attempt.
///
/// ## Invariants
/// - Every line item keeps `1 <= quantity <= stock_available`
/// - Totals are derived on demand, never cached
/// - `Processing` is entered only through a passing guard
///   (method selected, delivery complete, card fields valid)
/// - `Success` is terminal: no transition leaves it
#[derive(Debug)]
pub struct CheckoutSession {
    step: Step,
    method: Option<PaymentMethod>,
    items: Vec<LineItem>,
    /// Cart-variant sessions collect delivery details; the single-product
    /// popup does not.
    requires_delivery: bool,
    delivery: DeliveryDetails,
    card: CardDetails,
    error: Option<String>,
    success: Option<SuccessData>,
    created_at: DateTime<Utc>,
}

impl CheckoutSession {
    /// Starts a checkout for a single product (the product-popup path).
    ///
    /// The requested quantity is clamped into the stock bounds.
    pub fn for_product(product: &Product, quantity: i64) -> Self {
        CheckoutSession {
            step: Step::Checkout,
            method: None,
            items: vec![LineItem::from_product(product, quantity)],
            requires_delivery: false,
            delivery: DeliveryDetails::default(),
            card: CardDetails::default(),
            error: None,
            success: None,
            created_at: Utc::now(),
        }
    }

    /// Starts a checkout for a pre-populated cart (the checkout-page path).
    ///
    /// Cart sessions require delivery details before proceeding.
    pub fn for_cart(items: Vec<LineItem>) -> Self {
        CheckoutSession {
            step: Step::Checkout,
            method: None,
            items,
            requires_delivery: true,
            delivery: DeliveryDetails::default(),
            card: CardDetails::default(),
            error: None,
            success: None,
            created_at: Utc::now(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The currently active step.
    pub fn step(&self) -> Step {
        self.step
    }

    /// The error overlay, if any. Rendered inline on Checkout/CardPayment.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The selected payment method, if one has been picked.
    pub fn selected_method(&self) -> Option<PaymentMethod> {
        self.method
    }

    /// The line items in this session.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Whether this session collects delivery details (cart variant).
    pub fn requires_delivery(&self) -> bool {
        self.requires_delivery
    }

    /// The delivery form as currently filled in.
    pub fn delivery_details(&self) -> &DeliveryDetails {
        &self.delivery
    }

    /// The card form as currently filled in.
    pub fn card_details(&self) -> &CardDetails {
        &self.card
    }

    /// The stored server records after Success; None before.
    pub fn success_data(&self) -> Option<&SuccessData> {
        self.success.as_ref()
    }

    /// When this attempt started.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    // =========================================================================
    // Totals (derived, never cached)
    // =========================================================================

    /// Sum of line totals across all items.
    pub fn subtotal(&self) -> Money {
        self.items
            .iter()
            .map(LineItem::line_total)
            .fold(Money::zero(), |acc, t| acc + t)
    }

    /// Flat delivery fee charged on every order.
    pub const fn delivery_fee(&self) -> Money {
        DELIVERY_FEE
    }

    /// Grand total: subtotal + delivery fee. This is the payment amount.
    pub fn total(&self) -> Money {
        self.subtotal() + DELIVERY_FEE
    }

    // =========================================================================
    // Form Input (Checkout / CardPayment steps)
    // =========================================================================

    /// Stores the selected payment method. Only meaningful on Checkout.
    pub fn select_method(&mut self, method: PaymentMethod) {
        if self.step == Step::Checkout {
            self.method = Some(method);
        }
    }

    /// Sets an item's quantity; out-of-range values are silently rejected.
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) {
        if self.step != Step::Checkout {
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            item.set_quantity(quantity);
        }
    }

    /// Increments an item's quantity, saturating at available stock.
    pub fn increment_quantity(&mut self, product_id: &str) {
        if self.step != Step::Checkout {
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            item.increment();
        }
    }

    /// Decrements an item's quantity, saturating at 1.
    pub fn decrement_quantity(&mut self, product_id: &str) {
        if self.step != Step::Checkout {
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            item.decrement();
        }
    }

    /// Replaces the delivery form contents (cart variant).
    pub fn set_delivery_details(&mut self, delivery: DeliveryDetails) {
        self.delivery = delivery;
    }

    /// Replaces the card form contents.
    pub fn set_card_details(&mut self, card: CardDetails) {
        self.card = card;
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Proceed from the Checkout step.
    ///
    /// ## Guards (checked in order)
    /// 1. Delivery details complete (cart variant only)
    /// 2. A payment method is selected
    ///
    /// ## Outcome
    /// - Card: moves to CardPayment (card fields collected next)
    /// - Cash: moves straight to Processing; the caller must now submit
    /// - Guard failure: step unchanged, error overlay set
    ///
    /// Returns the step now active so the flow controller can decide
    /// whether a submission is due.
    pub fn proceed(&mut self) -> Step {
        if self.step != Step::Checkout {
            return self.step;
        }

        if self.requires_delivery {
            if let Err(e) = validate_delivery_details(&self.delivery) {
                self.set_validation_error(e);
                return self.step;
            }
        }

        let Some(method) = self.method else {
            self.set_validation_error(ValidationError::PaymentMethodMissing);
            return self.step;
        };

        match method {
            PaymentMethod::Card => {
                self.step = Step::CardPayment;
            }
            PaymentMethod::Cash => {
                // Submission starts with a clean overlay.
                self.error = None;
                self.step = Step::Processing;
            }
        }
        self.step
    }

    /// Submit from the CardPayment step.
    ///
    /// Valid card fields move the session to Processing; the caller must
    /// then submit. A failing field sets its message and stays put.
    pub fn submit_card(&mut self) -> Step {
        if self.step != Step::CardPayment {
            return self.step;
        }

        if let Err(e) = validate_card_details(&self.card) {
            self.set_validation_error(e);
            return self.step;
        }

        self.error = None;
        self.step = Step::Processing;
        self.step
    }

    /// Back from CardPayment to Checkout. No-op elsewhere.
    pub fn back(&mut self) {
        if self.step == Step::CardPayment {
            self.step = Step::Checkout;
        }
    }

    /// Records a failed submission: sets the error overlay and reverts to
    /// the input step matching the chosen method (CardPayment for card,
    /// Checkout for cash). Only meaningful while Processing.
    pub fn fail_submission(&mut self, message: impl Into<String>) {
        if self.step != Step::Processing {
            return;
        }
        self.error = Some(message.into());
        self.step = match self.method {
            Some(PaymentMethod::Card) => Step::CardPayment,
            _ => Step::Checkout,
        };
    }

    /// Records a successful submission: stores both server records and
    /// enters the terminal Success step. Only meaningful while Processing.
    pub fn complete(&mut self, order: Order, payment: Payment) {
        if self.step != Step::Processing {
            return;
        }
        self.error = None;
        self.success = Some(SuccessData { order, payment });
        self.step = Step::Success;
    }

    fn set_validation_error(&mut self, error: ValidationError) {
        self.error = Some(error.to_string());
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PaymentStatus;

    fn kettle() -> Product {
        Product {
            id: "prod-1".to_string(),
            name: "Kettle".to_string(),
            price: 1000,
            stock_quantity: 5,
            image_base64: None,
        }
    }

    fn valid_card() -> CardDetails {
        CardDetails {
            card_number: "4111111111111111".to_string(),
            card_holder: "Ali Raza".to_string(),
            expiry_date: "12/27".to_string(),
            cvv: "123".to_string(),
        }
    }

    fn valid_delivery() -> DeliveryDetails {
        DeliveryDetails {
            address: "12 Mall Road".to_string(),
            city: "Lahore".to_string(),
            postal_code: "54000".to_string(),
            phone_number: "0300-1234567".to_string(),
        }
    }

    fn order_record(id: &str) -> Order {
        Order {
            id: id.to_string(),
            extra: serde_json::Map::new(),
        }
    }

    fn payment_record(id: &str, method: PaymentMethod, amount: i64) -> Payment {
        Payment {
            id: id.to_string(),
            payment_method: method,
            amount: Money::from_rupees(amount),
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn test_totals_invariant() {
        let mut session = CheckoutSession::for_product(&kettle(), 2);
        assert_eq!(session.subtotal().rupees(), 2000);
        assert_eq!(session.total().rupees(), 2350);

        // Recomputed after every quantity change.
        session.increment_quantity("prod-1");
        assert_eq!(session.subtotal().rupees(), 3000);
        assert_eq!(
            session.total(),
            session.subtotal() + session.delivery_fee()
        );
    }

    #[test]
    fn test_quantity_never_leaves_bounds() {
        let mut session = CheckoutSession::for_product(&kettle(), 1);

        session.set_quantity("prod-1", 0);
        assert_eq!(session.items()[0].quantity, 1);

        session.set_quantity("prod-1", 99);
        assert_eq!(session.items()[0].quantity, 1);

        for _ in 0..10 {
            session.increment_quantity("prod-1");
        }
        assert_eq!(session.items()[0].quantity, 5); // stock ceiling

        for _ in 0..10 {
            session.decrement_quantity("prod-1");
        }
        assert_eq!(session.items()[0].quantity, 1); // floor
    }

    #[test]
    fn test_proceed_without_method_sets_error() {
        let mut session = CheckoutSession::for_product(&kettle(), 1);
        assert_eq!(session.proceed(), Step::Checkout);
        assert_eq!(session.error(), Some("Please select a payment method"));
    }

    #[test]
    fn test_proceed_cash_enters_processing() {
        let mut session = CheckoutSession::for_product(&kettle(), 2);
        session.select_method(PaymentMethod::Cash);
        assert_eq!(session.proceed(), Step::Processing);
        assert_eq!(session.error(), None);
    }

    #[test]
    fn test_proceed_card_enters_card_step() {
        let mut session = CheckoutSession::for_product(&kettle(), 2);
        session.select_method(PaymentMethod::Card);
        assert_eq!(session.proceed(), Step::CardPayment);
    }

    #[test]
    fn test_cart_variant_requires_delivery_first() {
        let items = vec![LineItem::from_product(&kettle(), 2)];
        let mut session = CheckoutSession::for_cart(items);
        session.select_method(PaymentMethod::Cash);

        // Empty delivery form blocks before the method guard.
        assert_eq!(session.proceed(), Step::Checkout);
        assert_eq!(session.error(), Some("Please enter your delivery address"));

        session.set_delivery_details(valid_delivery());
        assert_eq!(session.proceed(), Step::Processing);
    }

    #[test]
    fn test_card_validation_blocks_submission() {
        let mut session = CheckoutSession::for_product(&kettle(), 1);
        session.select_method(PaymentMethod::Card);
        session.proceed();

        let mut card = valid_card();
        card.cvv = "1".to_string();
        session.set_card_details(card);

        assert_eq!(session.submit_card(), Step::CardPayment);
        assert_eq!(session.error(), Some("Please enter a valid CVV"));

        session.set_card_details(valid_card());
        assert_eq!(session.submit_card(), Step::Processing);
        assert_eq!(session.error(), None);
    }

    #[test]
    fn test_back_returns_to_checkout() {
        let mut session = CheckoutSession::for_product(&kettle(), 1);
        session.select_method(PaymentMethod::Card);
        session.proceed();
        assert_eq!(session.step(), Step::CardPayment);

        session.back();
        assert_eq!(session.step(), Step::Checkout);
        // Method selection survives the round trip.
        assert_eq!(session.selected_method(), Some(PaymentMethod::Card));
    }

    #[test]
    fn test_fail_submission_reverts_per_method() {
        // Cash: failure lands back on Checkout.
        let mut session = CheckoutSession::for_product(&kettle(), 1);
        session.select_method(PaymentMethod::Cash);
        session.proceed();
        session.fail_submission("Insufficient stock: only 1 left");
        assert_eq!(session.step(), Step::Checkout);
        assert_eq!(session.error(), Some("Insufficient stock: only 1 left"));

        // Card: failure lands back on CardPayment.
        let mut session = CheckoutSession::for_product(&kettle(), 1);
        session.select_method(PaymentMethod::Card);
        session.proceed();
        session.set_card_details(valid_card());
        session.submit_card();
        session.fail_submission("Failed to process your order. Please try again.");
        assert_eq!(session.step(), Step::CardPayment);
    }

    #[test]
    fn test_complete_is_terminal() {
        let mut session = CheckoutSession::for_product(&kettle(), 2);
        session.select_method(PaymentMethod::Cash);
        session.proceed();

        session.complete(
            order_record("ord-1"),
            payment_record("pay-1", PaymentMethod::Cash, 2350),
        );
        assert_eq!(session.step(), Step::Success);
        let data = session.success_data().unwrap();
        assert_eq!(data.order.id, "ord-1");
        assert_eq!(data.payment.payment_method, PaymentMethod::Cash);
        assert_eq!(
            data.payment.payment_method.settlement_status(),
            PaymentStatus::Pending
        );

        // No transition leaves Success.
        assert_eq!(session.proceed(), Step::Success);
        session.back();
        session.fail_submission("late failure");
        assert_eq!(session.step(), Step::Success);
        assert_eq!(session.error(), None);
    }

    #[test]
    fn test_processing_accepts_no_input() {
        let mut session = CheckoutSession::for_product(&kettle(), 2);
        session.select_method(PaymentMethod::Cash);
        session.proceed();
        assert_eq!(session.step(), Step::Processing);

        session.set_quantity("prod-1", 1);
        session.increment_quantity("prod-1");
        session.select_method(PaymentMethod::Card);
        assert_eq!(session.items()[0].quantity, 2);
        assert_eq!(session.selected_method(), Some(PaymentMethod::Cash));
    }

    #[test]
    fn test_step_wire_names() {
        assert_eq!(serde_json::to_string(&Step::Checkout).unwrap(), "\"checkout\"");
        assert_eq!(
            serde_json::to_string(&Step::CardPayment).unwrap(),
            "\"cardPayment\""
        );
        assert_eq!(
            serde_json::to_string(&Step::Processing).unwrap(),
            "\"processing\""
        );
        assert_eq!(serde_json::to_string(&Step::Success).unwrap(), "\"success\"");
    }
}
