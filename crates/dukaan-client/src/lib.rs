//! # Dukaan Client
//!
//! Backend communication for the Dukaan storefront checkout: the REST
//! client, the session store, and the flow controller that drives a
//! [`dukaan_core::CheckoutSession`] through order + payment submission.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         dukaan-client                                   │
//! │                                                                         │
//! │  ┌──────────────┐   owns    ┌──────────────────────┐                    │
//! │  │ CheckoutFlow │──────────►│ dukaan_core::        │  (pure, no I/O)    │
//! │  │  (flow.rs)   │           │ CheckoutSession      │                    │
//! │  └──────┬───────┘           └──────────────────────┘                    │
//! │         │ submits through                                               │
//! │         ▼                                                               │
//! │  ┌──────────────┐  impl    ┌──────────────┐   reqwest   ┌────────────┐ │
//! │  │ OrderGateway │◄─────────│   OrderApi   │────────────►│  backend   │ │
//! │  │   (trait)    │          │   (api.rs)   │             │ (REST/JSON)│ │
//! │  └──────────────┘          └──────────────┘             └────────────┘ │
//! │         ▲                                                               │
//! │         │ credentials per submission                                    │
//! │  ┌──────┴───────┐                                                       │
//! │  │ SessionStore │  (session.rs - trait + in-memory impl)                │
//! │  └──────────────┘                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust,no_run
//! use dukaan_client::api::OrderApi;
//! use dukaan_client::config::ApiConfig;
//! use dukaan_client::flow::CheckoutFlow;
//! use dukaan_client::session::MemorySessionStore;
//! use dukaan_core::types::{PaymentMethod, Product};
//! use dukaan_core::Step;
//!
//! # async fn run() -> Result<(), dukaan_client::error::ClientError> {
//! let api = OrderApi::new(&ApiConfig::from_env())?;
//! let store = MemorySessionStore::new();
//! store.login("jwt-abc", "user-1");
//!
//! let kettle = Product {
//!     id: "prod-1".into(),
//!     name: "Kettle".into(),
//!     price: 1000,
//!     stock_quantity: 5,
//!     image_base64: None,
//! };
//!
//! let mut flow = CheckoutFlow::for_product(&kettle, 2, api, store);
//! flow.session_mut().select_method(PaymentMethod::Cash);
//! flow.proceed().await;
//!
//! match flow.session().step() {
//!     Step::Success => println!("order placed"),
//!     _ => println!("error: {:?}", flow.session().error()),
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod flow;
pub mod session;

pub use api::{OrderApi, OrderGateway};
pub use config::ApiConfig;
pub use error::{ClientError, ClientResult};
pub use flow::CheckoutFlow;
pub use session::{MemorySessionStore, SessionContext, SessionStore};
