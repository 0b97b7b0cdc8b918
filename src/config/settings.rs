//! Client Configuration
//!
//! Defines the configuration schema for a ChatWork client.

use serde::{Deserialize, Serialize};

/// Production endpoint of the v2 API
pub const DEFAULT_BASE_URL: &str = "https://api.chatwork.com/v2";

/// Settings needed to talk to the API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// API token sent as `X-ChatWorkToken`
    #[serde(default)]
    pub api_key: String,

    /// Base URL endpoints are appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Overall request timeout in seconds. Unset keeps the transport default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl ClientConfig {
    /// Configuration for `api_key` against the production endpoint
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }

    /// Point the client at another base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the transport timeout
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(String::new())
    }
}
