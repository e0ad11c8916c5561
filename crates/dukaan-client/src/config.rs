//! # Client Configuration
//!
//! Where the backend lives and how long we wait for it.

use std::env;
use std::time::Duration;

/// Default backend origin for local development.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Default per-request timeout. A checkout submission that takes longer than
/// this is treated as failed rather than leaving the customer on the
/// processing screen indefinitely.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable overriding the backend origin.
pub const API_URL_ENV: &str = "DUKAAN_API_URL";

// =============================================================================
// Api Config
// =============================================================================

/// Connection settings for [`crate::api::OrderApi`].
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Backend origin, no trailing slash (paths like `/api/order/create`
    /// are appended verbatim).
    pub base_url: String,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl ApiConfig {
    /// Config pointing at an explicit origin. Trailing slashes are stripped.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        ApiConfig {
            base_url,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Config from the environment: `DUKAAN_API_URL` when set, otherwise the
    /// local-development default.
    pub fn from_env() -> Self {
        match env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => ApiConfig::new(url),
            _ => ApiConfig::default(),
        }
    }

    /// Overrides the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig::new(DEFAULT_BASE_URL)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
