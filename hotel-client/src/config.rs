//! Client configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | HOTEL_API_URL | http://localhost:3000 | Site base URL |
//! | HOTEL_API_TOKEN | (none) | Bearer token for admin endpoints |
//! | HOTEL_API_TIMEOUT_SECS | 30 | Request timeout |

use crate::client::NetworkHttpClient;
use crate::error::ClientResult;

const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration for connecting to the site API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Site base URL (e.g., "https://grandhotel.example")
    pub base_url: String,

    /// Bearer token sent with every request
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// User-Agent header
    pub user_agent: String,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: DEFAULT_TIMEOUT_SECS,
            user_agent: format!("hotel-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset or unparsable
    pub fn from_env() -> Self {
        let mut config =
            Self::new(std::env::var("HOTEL_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into()));
        config.token = std::env::var("HOTEL_API_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());
        config.timeout = std::env::var("HOTEL_API_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        config
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the User-Agent header
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Create a network HTTP client from this configuration
    pub fn build_http_client(&self) -> ClientResult<NetworkHttpClient> {
        NetworkHttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
