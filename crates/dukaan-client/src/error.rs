//! # Client Errors
//!
//! Failure types for backend communication, and the mapping from internal
//! errors to the messages the checkout shows.
//!
//! ## Error Surfacing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     How Errors Reach the Customer                       │
//! │                                                                         │
//! │  ClientError::Api { message: Some(m) }  ──► m, verbatim                 │
//! │      (the backend writes customer-readable rejections, e.g.             │
//! │       "Insufficient stock: only 1 left")                                │
//! │                                                                         │
//! │  ClientError::NotAuthenticated          ──► "Please login to place      │
//! │                                              an order"                  │
//! │                                                                         │
//! │  everything else (transport, parse,     ──► "Failed to process your     │
//! │  bodyless rejection, bad config)             order. Please try again."  │
//! │                                                                         │
//! │  The full error is always logged; only user_message() is rendered.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Fallback shown when a failure carries no customer-readable message.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to process your order. Please try again.";

/// Shown when a submission is attempted with no active session.
pub const LOGIN_REQUIRED_MESSAGE: &str = "Please login to place an order";

// =============================================================================
// Client Error
// =============================================================================

/// Errors from backend communication and flow preconditions.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure: connection refused, timeout, TLS, etc.
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status. `message` is the
    /// `message` field of the error body, when one was present and parseable.
    #[error("api error (status {status}): {message:?}")]
    Api { status: u16, message: Option<String> },

    /// A success response whose body did not match the expected shape.
    #[error("unexpected response shape: {0}")]
    Parse(String),

    /// No active session; the customer must log in first.
    #[error("no active session")]
    NotAuthenticated,

    /// Client construction failed (bad base URL, builder error).
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl ClientError {
    /// The message the checkout renders for this error.
    ///
    /// Backend rejection messages pass through verbatim - the backend
    /// already writes them for customers. Everything else collapses to a
    /// fixed string so internals (URLs, status codes, serde paths) never
    /// reach the screen.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api {
                message: Some(message),
                ..
            } => message.clone(),
            ClientError::NotAuthenticated => LOGIN_REQUIRED_MESSAGE.to_string(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

/// Convenience type alias for client results.
pub type ClientResult<T> = Result<T, ClientError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_message_passes_through_verbatim() {
        let err = ClientError::Api {
            status: 400,
            message: Some("Insufficient stock: only 1 left".to_string()),
        };
        assert_eq!(err.user_message(), "Insufficient stock: only 1 left");
    }

    #[test]
    fn test_bodyless_rejection_falls_back_to_generic() {
        let err = ClientError::Api {
            status: 500,
            message: None,
        };
        assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn test_missing_session_message() {
        assert_eq!(
            ClientError::NotAuthenticated.user_message(),
            "Please login to place an order"
        );
    }

    #[test]
    fn test_parse_error_never_leaks_detail() {
        let err = ClientError::Parse("missing field `order` at line 1".to_string());
        assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
    }
}
