//! # Session Store
//!
//! Holds the logged-in customer's credentials and hands them to the
//! checkout flow at submission time.
//!
//! ## Design
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Session Injection                                 │
//! │                                                                         │
//! │  Login screen ──► SessionStore::login(token, user_id)                   │
//! │                          │                                              │
//! │                          ▼                                              │
//! │  CheckoutFlow::submit() ──► store.current()                             │
//! │       │                                                                 │
//! │       ├── Some(ctx) → Bearer {ctx.token} on both calls,                 │
//! │       │               ctx.user_id in the payment body                   │
//! │       └── None      → fail before any network call                      │
//! │                        ("Please login to place an order")               │
//! │                                                                         │
//! │  The flow never caches credentials - it asks the store on every         │
//! │  submission, so a logout mid-checkout takes effect immediately.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, PoisonError, RwLock};

// =============================================================================
// Session Context
// =============================================================================

/// The credentials of the logged-in customer.
#[derive(Debug, Clone)]
pub struct SessionContext {
    /// Backend-issued bearer token, sent on every request.
    pub token: String,

    /// Backend identifier of the customer, sent in the payment body.
    pub user_id: String,
}

// =============================================================================
// Session Store
// =============================================================================

/// Source of the active session, if any.
///
/// The checkout flow is generic over this so hosts can plug in whatever
/// credential storage they use; [`MemorySessionStore`] covers tests and
/// simple embedders.
pub trait SessionStore: Send + Sync {
    /// The active session, or None when nobody is logged in.
    fn current(&self) -> Option<SessionContext>;
}

impl<S: SessionStore + ?Sized> SessionStore for Arc<S> {
    fn current(&self) -> Option<SessionContext> {
        (**self).current()
    }
}

// =============================================================================
// Memory Session Store
// =============================================================================

/// In-process session store.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: RwLock<Option<SessionContext>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a login, replacing any previous session.
    pub fn login(&self, token: impl Into<String>, user_id: impl Into<String>) {
        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = Some(SessionContext {
            token: token.into(),
            user_id: user_id.into(),
        });
    }

    /// Clears the session.
    pub fn logout(&self) {
        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }
}

impl SessionStore for MemorySessionStore {
    fn current(&self) -> Option<SessionContext> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
