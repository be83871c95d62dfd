//! HTTP client for arXiv
//!
//! Plain reqwest client with a descriptive user agent, per arXiv etiquette.

use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Fetch configuration
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Base URL (default: https://arxiv.org)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: "https://arxiv.org".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Errors from feed fetching
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Catchup returned status {0}")]
    Status(u16),

    #[error("Malformed listing: {0}")]
    MalformedListing(String),
}

const USER_AGENT: &str = concat!("paperwatch/", env!("CARGO_PKG_VERSION"));

/// Create the HTTP client used for catchup fetches
pub fn create_client(config: &FetchConfig) -> Result<Client, FetchError> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| FetchError::ClientBuild(e.to_string()))
}
