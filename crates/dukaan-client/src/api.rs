//! # Order API
//!
//! The REST client for the Dukaan backend, plus the wire DTOs for the two
//! submission endpoints and the cart fetch.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Backend Endpoints                                │
//! │                                                                         │
//! │  POST /api/order/create    body: CreateOrderRequest                     │
//! │       Bearer token         resp: { "order": { "_id": ..., ... } }       │
//! │                                                                         │
//! │  POST /api/payment/add     body: AddPaymentRequest                      │
//! │       Bearer token         resp: { "payment": { "_id": ..., ... } }     │
//! │                                                                         │
//! │  GET  /api/cart/all        resp: { "cartItems": [ { "_id", "quantity",  │
//! │       Bearer token                 "product_id": {<product doc>} } ] }  │
//! │                                                                         │
//! │  Rejections: non-2xx with body { "message": "<customer-readable>" }    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Field naming is uneven on purpose - the backend mixes camelCase
//! (`orderItems`, `deliveryAddress`) and snake_case (`product_id`,
//! `payment_status`) and the DTOs here reproduce it exactly.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use dukaan_core::money::Money;
use dukaan_core::types::{Order, Payment, PaymentMethod, PaymentStatus, Product};
use dukaan_core::LineItem;

use crate::config::ApiConfig;
use crate::error::{ClientError, ClientResult};

// =============================================================================
// Request DTOs
// =============================================================================

/// One line of an order submission.
#[derive(Debug, Clone, Serialize)]
pub struct OrderItemRequest {
    pub product_id: String,
    pub quantity: i64,
    /// Line total (unit price × quantity), not the unit price.
    pub subtotal_price: Money,
}

impl From<&LineItem> for OrderItemRequest {
    fn from(item: &LineItem) -> Self {
        OrderItemRequest {
            product_id: item.product_id.clone(),
            quantity: item.quantity,
            subtotal_price: item.line_total(),
        }
    }
}

/// Body of `POST /api/order/create`.
///
/// Delivery fields are sent only by the cart checkout variant; the
/// single-product popup omits the keys entirely.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub order_items: Vec<OrderItemRequest>,

    /// Combined `"{address}, {city}, {postal_code}"` string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
}

/// Body of `POST /api/payment/add`.
#[derive(Debug, Clone, Serialize)]
pub struct AddPaymentRequest {
    /// `_id` of the order created moments earlier.
    pub order_id: String,

    pub user_id: String,

    /// The session grand total (subtotal + delivery fee).
    pub amount: Money,

    pub payment_method: PaymentMethod,

    /// Always `payment_method.settlement_status()`: Completed for card,
    /// Pending for cash.
    pub payment_status: PaymentStatus,
}

// =============================================================================
// Response DTOs
// =============================================================================

#[derive(Debug, Deserialize)]
struct OrderResponse {
    order: Order,
}

#[derive(Debug, Deserialize)]
struct PaymentResponse {
    payment: Payment,
}

#[derive(Debug, Deserialize)]
struct CartResponse {
    #[serde(rename = "cartItems")]
    cart_items: Vec<CartItem>,
}

/// One entry of `GET /api/cart/all`. The backend populates the product
/// reference, so the full product document arrives under `product_id`.
#[derive(Debug, Clone, Deserialize)]
pub struct CartItem {
    #[serde(rename = "_id")]
    pub id: String,

    pub quantity: i64,

    #[serde(rename = "product_id")]
    pub product: Product,
}

impl CartItem {
    /// Converts a cart entry into a checkout line item, snapshotting the
    /// product's current name/price/stock.
    pub fn into_line_item(self) -> LineItem {
        LineItem::from_product(&self.product, self.quantity)
    }
}

/// Error body the backend sends with non-2xx responses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

// =============================================================================
// Order Gateway
// =============================================================================

/// The backend calls the checkout flow makes, as a seam.
///
/// [`OrderApi`] is the real implementation; tests substitute a recording
/// double so flow behavior is checked without a network.
#[allow(async_fn_in_trait)]
pub trait OrderGateway {
    async fn create_order(
        &self,
        token: &str,
        request: &CreateOrderRequest,
    ) -> ClientResult<Order>;

    async fn add_payment(
        &self,
        token: &str,
        request: &AddPaymentRequest,
    ) -> ClientResult<Payment>;

    async fn fetch_cart(&self, token: &str) -> ClientResult<Vec<CartItem>>;
}

impl<G: OrderGateway + Sync> OrderGateway for std::sync::Arc<G> {
    async fn create_order(
        &self,
        token: &str,
        request: &CreateOrderRequest,
    ) -> ClientResult<Order> {
        (**self).create_order(token, request).await
    }

    async fn add_payment(
        &self,
        token: &str,
        request: &AddPaymentRequest,
    ) -> ClientResult<Payment> {
        (**self).add_payment(token, request).await
    }

    async fn fetch_cart(&self, token: &str) -> ClientResult<Vec<CartItem>> {
        (**self).fetch_cart(token).await
    }
}

// =============================================================================
// Order API (reqwest implementation)
// =============================================================================

/// HTTP client for the Dukaan backend.
#[derive(Debug, Clone)]
pub struct OrderApi {
    http: reqwest::Client,
    base_url: String,
}

impl OrderApi {
    /// Builds a client from the given configuration.
    pub fn new(config: &ApiConfig) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::InvalidConfig(e.to_string()))?;

        Ok(OrderApi {
            http,
            base_url: config.base_url.clone(),
        })
    }

    async fn post_json<B, T>(&self, path: &str, token: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "sending request");

        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, token: &str) -> ClientResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "sending request");

        let response = self.http.get(&url).bearer_auth(token).send().await?;
        Self::parse_response(response).await
    }

    /// Success bodies parse into T; rejections become [`ClientError::Api`]
    /// carrying the backend's `message` field when one is present.
    async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let message = response
                .json::<ApiErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message);
            warn!(status = status.as_u16(), ?message, "backend rejected request");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))
    }
}

impl OrderGateway for OrderApi {
    async fn create_order(
        &self,
        token: &str,
        request: &CreateOrderRequest,
    ) -> ClientResult<Order> {
        let body: OrderResponse = self.post_json("/api/order/create", token, request).await?;
        Ok(body.order)
    }

    async fn add_payment(
        &self,
        token: &str,
        request: &AddPaymentRequest,
    ) -> ClientResult<Payment> {
        let body: PaymentResponse = self.post_json("/api/payment/add", token, request).await?;
        Ok(body.payment)
    }

    async fn fetch_cart(&self, token: &str) -> ClientResult<Vec<CartItem>> {
        let body: CartResponse = self.get_json("/api/cart/all", token).await?;
        Ok(body.cart_items)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
