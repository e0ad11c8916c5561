//! # Checkout Flow
//!
//! Drives a [`CheckoutSession`] through submission: session credentials,
//! the order call, then the payment call.
//!
//! ## Submission Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Submission Pipeline                                  │
//! │                                                                         │
//! │  session enters Processing (cash proceed / valid card submit)           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. store.current()                                                     │
//! │       └── None → fail ("Please login...") - ZERO network calls          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2. POST /api/order/create  (items, delivery for cart variant)          │
//! │       └── Err → fail with user_message(), session reverts               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  3. POST /api/payment/add   (order _id, user_id, grand total)           │
//! │       └── Err → fail; the created order is now orphaned (logged)        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  4. success callback, session.complete() → Success (terminal)           │
//! │                                                                         │
//! │  Nothing here returns Err to the caller: every failure becomes the      │
//! │  session's error overlay, exactly what the customer sees.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info, warn};

use dukaan_core::types::{LineItem, Order, Product};
use dukaan_core::{CheckoutSession, Step};

use crate::api::{AddPaymentRequest, CartItem, CreateOrderRequest, OrderGateway, OrderItemRequest};
use crate::error::{ClientError, ClientResult};
use crate::session::SessionStore;

/// Callback invoked once after a successful submission, before the session
/// turns terminal. Hosts use it to clear the server-side cart or navigate.
type SuccessCallback = Box<dyn Fn(&Order) + Send + Sync>;

// =============================================================================
// Checkout Flow
// =============================================================================

/// Owns one checkout session plus the gateway and session store it
/// submits through.
pub struct CheckoutFlow<G, S> {
    session: CheckoutSession,
    gateway: G,
    store: S,
    on_success: Option<SuccessCallback>,
}

impl<G: OrderGateway, S: SessionStore> CheckoutFlow<G, S> {
    /// Flow for the single-product popup.
    pub fn for_product(product: &Product, quantity: i64, gateway: G, store: S) -> Self {
        CheckoutFlow {
            session: CheckoutSession::for_product(product, quantity),
            gateway,
            store,
            on_success: None,
        }
    }

    /// Flow for a pre-populated cart (delivery details required).
    pub fn for_cart(items: Vec<LineItem>, gateway: G, store: S) -> Self {
        CheckoutFlow {
            session: CheckoutSession::for_cart(items),
            gateway,
            store,
            on_success: None,
        }
    }

    /// Fetches the customer's server-side cart and opens a cart checkout
    /// over it. Unlike submission, this is a loading operation, so failures
    /// surface as plain errors for the host to handle.
    pub async fn load_cart(gateway: G, store: S) -> ClientResult<Self> {
        let ctx = store.current().ok_or(ClientError::NotAuthenticated)?;
        let cart_items = gateway.fetch_cart(&ctx.token).await?;
        debug!(items = cart_items.len(), "cart loaded");

        let items = cart_items.into_iter().map(CartItem::into_line_item).collect();
        Ok(Self::for_cart(items, gateway, store))
    }

    /// The session, for rendering and for form input.
    pub fn session(&self) -> &CheckoutSession {
        &self.session
    }

    /// Mutable session access (quantity controls, form fields, back).
    pub fn session_mut(&mut self) -> &mut CheckoutSession {
        &mut self.session
    }

    /// Registers the success callback. At most one; a second call replaces
    /// the first.
    pub fn on_success(&mut self, callback: impl Fn(&Order) + Send + Sync + 'static) {
        self.on_success = Some(Box::new(callback));
    }

    /// Discards the flow and its session. Sessions are never reused; a
    /// reopened checkout starts from a fresh flow.
    pub fn close(self) {
        debug!(step = ?self.session.step(), "checkout closed");
    }

    // =========================================================================
    // Driving Transitions
    // =========================================================================

    /// Proceed from the Checkout step. Cash checkouts go straight into
    /// submission; card checkouts stop at the card step.
    pub async fn proceed(&mut self) {
        if self.session.proceed() == Step::Processing {
            self.submit().await;
        }
    }

    /// Submit from the CardPayment step. Valid card details start the
    /// submission; invalid ones leave the session on the card step with
    /// its message set.
    pub async fn submit_card_payment(&mut self) {
        if self.session.submit_card() == Step::Processing {
            self.submit().await;
        }
    }

    // =========================================================================
    // Submission
    // =========================================================================

    /// Runs the two backend calls for a session that just entered
    /// Processing. Every failure lands in the session's error overlay; the
    /// caller gets nothing to unwrap.
    async fn submit(&mut self) {
        let Some(ctx) = self.store.current() else {
            debug!("submission without a session, no request sent");
            self.session
                .fail_submission(ClientError::NotAuthenticated.user_message());
            return;
        };

        let Some(method) = self.session.selected_method() else {
            // Unreachable through proceed/submit_card, which guard on it.
            self.session
                .fail_submission(crate::error::GENERIC_FAILURE_MESSAGE);
            return;
        };

        let order_request = self.build_order_request();
        debug!(
            items = order_request.order_items.len(),
            total = self.session.total().rupees(),
            ?method,
            "creating order"
        );

        let order = match self.gateway.create_order(&ctx.token, &order_request).await {
            Ok(order) => order,
            Err(e) => {
                warn!(error = %e, "order creation failed");
                self.session.fail_submission(e.user_message());
                return;
            }
        };

        let payment_request = AddPaymentRequest {
            order_id: order.id.clone(),
            user_id: ctx.user_id.clone(),
            amount: self.session.total(),
            payment_method: method,
            payment_status: method.settlement_status(),
        };

        match self.gateway.add_payment(&ctx.token, &payment_request).await {
            Ok(payment) => {
                info!(order_id = %order.id, payment_id = %payment.id, "order placed");
                if let Some(callback) = &self.on_success {
                    callback(&order);
                }
                self.session.complete(order, payment);
            }
            Err(e) => {
                // The order record exists server-side with no payment
                // attached; flag it for reconciliation.
                warn!(
                    order_id = %order.id,
                    error = %e,
                    "payment failed after order creation, order is orphaned"
                );
                self.session.fail_submission(e.user_message());
            }
        }
    }

    fn build_order_request(&self) -> CreateOrderRequest {
        let order_items = self
            .session
            .items()
            .iter()
            .map(OrderItemRequest::from)
            .collect();

        let (delivery_address, contact_number) = if self.session.requires_delivery() {
            let delivery = self.session.delivery_details();
            (
                Some(delivery.combined_address()),
                Some(delivery.phone_number.clone()),
            )
        } else {
            (None, None)
        };

        CreateOrderRequest {
            order_items,
            delivery_address,
            contact_number,
        }
    }
}
