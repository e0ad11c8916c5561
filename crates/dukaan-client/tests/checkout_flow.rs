//! End-to-end checkout flow tests against a recording gateway double.
//!
//! These cover the full submission pipeline - session check, order call,
//! payment call, session transitions - without a network. Wire bodies are
//! recorded as JSON and asserted against the exact shapes the backend takes.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};

use dukaan_client::api::{AddPaymentRequest, CartItem, CreateOrderRequest, OrderGateway};
use dukaan_client::error::{ClientError, ClientResult};
use dukaan_client::flow::CheckoutFlow;
use dukaan_client::session::MemorySessionStore;
use dukaan_core::money::Money;
use dukaan_core::types::{CardDetails, DeliveryDetails, Order, Payment, PaymentMethod, Product};
use dukaan_core::Step;

// =============================================================================
// Recording Gateway Double
// =============================================================================

#[derive(Debug, Clone)]
struct RecordedCall {
    endpoint: &'static str,
    token: String,
    body: Value,
}

/// Gateway double: records every call, answers with canned results.
#[derive(Default)]
struct MockGateway {
    calls: Mutex<Vec<RecordedCall>>,
    /// When set, create_order fails with this (status, message).
    order_failure: Option<(u16, Option<&'static str>)>,
    /// When set, add_payment fails with this (status, message).
    payment_failure: Option<(u16, Option<&'static str>)>,
    /// Items returned by fetch_cart.
    cart: Vec<(&'static str, &'static str, i64, i64, i64)>, // (cart id, product id, price, stock, qty)
}

impl MockGateway {
    fn record(&self, endpoint: &'static str, token: &str, body: Value) {
        self.calls
            .lock()
            .unwrap()
            .push(RecordedCall {
                endpoint,
                token: token.to_string(),
                body,
            });
    }

    fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn failure(status: u16, message: Option<&str>) -> ClientError {
        ClientError::Api {
            status,
            message: message.map(str::to_string),
        }
    }
}

impl OrderGateway for MockGateway {
    async fn create_order(
        &self,
        token: &str,
        request: &CreateOrderRequest,
    ) -> ClientResult<Order> {
        self.record(
            "create_order",
            token,
            serde_json::to_value(request).unwrap(),
        );
        if let Some((status, message)) = self.order_failure {
            return Err(Self::failure(status, message));
        }
        Ok(Order {
            id: "ord-1".to_string(),
            extra: serde_json::Map::new(),
        })
    }

    async fn add_payment(
        &self,
        token: &str,
        request: &AddPaymentRequest,
    ) -> ClientResult<Payment> {
        self.record(
            "add_payment",
            token,
            serde_json::to_value(request).unwrap(),
        );
        if let Some((status, message)) = self.payment_failure {
            return Err(Self::failure(status, message));
        }
        Ok(Payment {
            id: "pay-1".to_string(),
            payment_method: request.payment_method,
            amount: request.amount,
            extra: serde_json::Map::new(),
        })
    }

    async fn fetch_cart(&self, token: &str) -> ClientResult<Vec<CartItem>> {
        self.record("fetch_cart", token, Value::Null);
        Ok(self
            .cart
            .iter()
            .map(|&(cart_id, product_id, price, stock, quantity)| CartItem {
                id: cart_id.to_string(),
                quantity,
                product: Product {
                    id: product_id.to_string(),
                    name: format!("Product {product_id}"),
                    price,
                    stock_quantity: stock,
                    image_base64: None,
                },
            })
            .collect())
    }
}

// =============================================================================
// Fixtures
// =============================================================================

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

fn logged_in_store() -> Arc<MemorySessionStore> {
    let store = Arc::new(MemorySessionStore::new());
    store.login("jwt-abc", "user-1");
    store
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn no_session_blocks_submission_before_any_network_call() {
    let gateway = Arc::new(MockGateway::default());
    let store = Arc::new(MemorySessionStore::new()); // nobody logged in

    let mut flow = CheckoutFlow::for_product(&kettle(), 2, gateway.clone(), store);
    flow.session_mut().select_method(PaymentMethod::Cash);
    flow.proceed().await;

    assert_eq!(flow.session().step(), Step::Checkout);
    assert_eq!(
        flow.session().error(),
        Some("Please login to place an order")
    );
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn cash_checkout_places_order_then_pending_payment() {
    let gateway = Arc::new(MockGateway::default());
    let completions = Arc::new(AtomicUsize::new(0));

    let mut flow = CheckoutFlow::for_product(&kettle(), 2, gateway.clone(), logged_in_store());
    let counter = completions.clone();
    flow.on_success(move |order| {
        assert_eq!(order.id, "ord-1");
        counter.fetch_add(1, Ordering::SeqCst);
    });

    flow.session_mut().select_method(PaymentMethod::Cash);
    flow.proceed().await;

    assert_eq!(flow.session().step(), Step::Success);
    assert_eq!(completions.load(Ordering::SeqCst), 1);

    let calls = gateway.calls();
    assert_eq!(calls.len(), 2);

    assert_eq!(calls[0].endpoint, "create_order");
    assert_eq!(calls[0].token, "jwt-abc");
    assert_eq!(
        calls[0].body,
        json!({
            "orderItems": [
                { "product_id": "prod-1", "quantity": 2, "subtotal_price": 2000 }
            ]
        })
    );

    assert_eq!(calls[1].endpoint, "add_payment");
    assert_eq!(calls[1].token, "jwt-abc");
    assert_eq!(
        calls[1].body,
        json!({
            "order_id": "ord-1",
            "user_id": "user-1",
            "amount": 2350,
            "payment_method": "Cash",
            "payment_status": "Pending",
        })
    );

    let data = flow.session().success_data().unwrap();
    assert_eq!(data.order.id, "ord-1");
    assert_eq!(data.payment.amount, Money::from_rupees(2350));
}

#[tokio::test]
async fn card_checkout_walks_card_step_and_settles_completed() {
    let gateway = Arc::new(MockGateway::default());

    let mut flow = CheckoutFlow::for_product(&kettle(), 2, gateway.clone(), logged_in_store());
    flow.session_mut().select_method(PaymentMethod::Card);

    flow.proceed().await;
    assert_eq!(flow.session().step(), Step::CardPayment);
    assert!(gateway.calls().is_empty()); // nothing sent before card entry

    flow.session_mut().set_card_details(valid_card());
    flow.submit_card_payment().await;

    assert_eq!(flow.session().step(), Step::Success);

    let calls = gateway.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].body["payment_method"], "Card");
    assert_eq!(calls[1].body["payment_status"], "Completed");
}

#[tokio::test]
async fn invalid_card_details_never_reach_the_network() {
    let gateway = Arc::new(MockGateway::default());

    let mut flow = CheckoutFlow::for_product(&kettle(), 1, gateway.clone(), logged_in_store());
    flow.session_mut().select_method(PaymentMethod::Card);
    flow.proceed().await;

    let mut card = valid_card();
    card.card_number = "4111".to_string();
    flow.session_mut().set_card_details(card);
    flow.submit_card_payment().await;

    assert_eq!(flow.session().step(), Step::CardPayment);
    assert_eq!(
        flow.session().error(),
        Some("Please enter a valid card number")
    );
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn backend_rejection_surfaces_verbatim_and_reverts_to_checkout() {
    let gateway = Arc::new(MockGateway {
        order_failure: Some((400, Some("Insufficient stock: only 1 left"))),
        ..MockGateway::default()
    });

    let mut flow = CheckoutFlow::for_product(&kettle(), 2, gateway.clone(), logged_in_store());
    flow.session_mut().select_method(PaymentMethod::Cash);
    flow.proceed().await;

    assert_eq!(flow.session().step(), Step::Checkout);
    assert_eq!(
        flow.session().error(),
        Some("Insufficient stock: only 1 left")
    );

    // The payment call must never fire after a failed order call.
    let calls = gateway.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].endpoint, "create_order");
}

#[tokio::test]
async fn bodyless_rejection_falls_back_to_generic_message() {
    let gateway = Arc::new(MockGateway {
        order_failure: Some((500, None)),
        ..MockGateway::default()
    });

    let mut flow = CheckoutFlow::for_product(&kettle(), 1, gateway, logged_in_store());
    flow.session_mut().select_method(PaymentMethod::Cash);
    flow.proceed().await;

    assert_eq!(
        flow.session().error(),
        Some("Failed to process your order. Please try again.")
    );
}

#[tokio::test]
async fn payment_failure_reverts_card_session_to_card_step() {
    let gateway = Arc::new(MockGateway {
        payment_failure: Some((500, None)),
        ..MockGateway::default()
    });
    let completions = Arc::new(AtomicUsize::new(0));

    let mut flow = CheckoutFlow::for_product(&kettle(), 2, gateway.clone(), logged_in_store());
    let counter = completions.clone();
    flow.on_success(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    flow.session_mut().select_method(PaymentMethod::Card);
    flow.proceed().await;
    flow.session_mut().set_card_details(valid_card());
    flow.submit_card_payment().await;

    // Order went through, payment did not: card sessions land back on the
    // card step with the failure shown, and no success fires.
    assert_eq!(flow.session().step(), Step::CardPayment);
    assert!(flow.session().error().is_some());
    assert_eq!(completions.load(Ordering::SeqCst), 0);

    let calls = gateway.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].endpoint, "create_order");
    assert_eq!(calls[1].endpoint, "add_payment");
}

#[tokio::test]
async fn cart_checkout_sends_delivery_fields_and_multi_item_body() {
    let gateway = Arc::new(MockGateway {
        cart: vec![
            ("cart-1", "prod-1", 1000, 5, 2),
            ("cart-2", "prod-2", 250, 10, 4),
        ],
        ..MockGateway::default()
    });

    let mut flow = CheckoutFlow::load_cart(gateway.clone(), logged_in_store())
        .await
        .unwrap();

    // subtotal = 2*1000 + 4*250 = 3000; total = 3350
    assert_eq!(flow.session().subtotal().rupees(), 3000);
    assert_eq!(flow.session().total().rupees(), 3350);

    flow.session_mut().set_delivery_details(DeliveryDetails {
        address: "12 Mall Road".to_string(),
        city: "Lahore".to_string(),
        postal_code: "54000".to_string(),
        phone_number: "0300-1234567".to_string(),
    });
    flow.session_mut().select_method(PaymentMethod::Cash);
    flow.proceed().await;

    assert_eq!(flow.session().step(), Step::Success);

    let calls = gateway.calls();
    assert_eq!(calls.len(), 3); // fetch_cart + order + payment

    let order_body = &calls[1].body;
    assert_eq!(order_body["deliveryAddress"], "12 Mall Road, Lahore, 54000");
    assert_eq!(order_body["contactNumber"], "0300-1234567");
    assert_eq!(order_body["orderItems"].as_array().unwrap().len(), 2);
    assert_eq!(order_body["orderItems"][1]["subtotal_price"], 1000);

    assert_eq!(calls[2].body["amount"], 3350);
}

#[tokio::test]
async fn cart_checkout_blocks_on_missing_delivery_details() {
    let gateway = Arc::new(MockGateway {
        cart: vec![("cart-1", "prod-1", 1000, 5, 1)],
        ..MockGateway::default()
    });

    let mut flow = CheckoutFlow::load_cart(gateway.clone(), logged_in_store())
        .await
        .unwrap();
    flow.session_mut().select_method(PaymentMethod::Cash);
    flow.proceed().await;

    assert_eq!(flow.session().step(), Step::Checkout);
    assert_eq!(
        flow.session().error(),
        Some("Please enter your delivery address")
    );
    // Only the cart fetch hit the gateway.
    assert_eq!(gateway.calls().len(), 1);
}

#[tokio::test]
async fn load_cart_requires_a_session() {
    let gateway = Arc::new(MockGateway::default());
    let store = Arc::new(MemorySessionStore::new());

    let result = CheckoutFlow::load_cart(gateway.clone(), store).await;
    assert!(matches!(result, Err(ClientError::NotAuthenticated)));
    assert!(gateway.calls().is_empty());
}
