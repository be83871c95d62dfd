//! Slack delivery client
//!
//! Posts the rendered digest to a channel via `chat.postMessage`. The Slack
//! Web API reports failures in-band: a 200 response with `ok: false` and an
//! error string such as `invalid_auth` or `channel_not_found`.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

const SLACK_API_BASE: &str = "https://slack.com/api";

/// Errors from digest delivery
#[derive(Debug, Error)]
pub enum SlackError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Slack API error: {0}")]
    Api(String),
}

/// Slack delivery configuration
#[derive(Debug, Clone)]
pub struct SlackConfig {
    /// Bot token (`xoxb-...`)
    pub token: String,
    /// Destination channel, by id or `#name`
    pub channel: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// API base URL, overridable for tests
    pub base_url: String,
}

impl SlackConfig {
    pub fn new(token: &str, channel: &str) -> Self {
        Self {
            token: token.to_string(),
            channel: channel.to_string(),
            timeout_secs: 30,
            base_url: SLACK_API_BASE.to_string(),
        }
    }
}

/// Wire shape of Slack Web API responses, reduced to what we read
#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    team: Option<String>,
}

impl ApiResponse {
    fn into_result(self) -> Result<Self, SlackError> {
        if self.ok {
            Ok(self)
        } else {
            Err(SlackError::Api(
                self.error.unwrap_or_else(|| "unknown error".to_string()),
            ))
        }
    }
}

/// Client for the Slack Web API
pub struct SlackClient {
    client: reqwest::Client,
    config: SlackConfig,
}

impl SlackClient {
    pub fn new(config: SlackConfig) -> Result<Self, SlackError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SlackError::ClientBuild(e.to_string()))?;
        Ok(Self { client, config })
    }

    /// Post a mrkdwn message to the configured channel
    pub async fn post_message(&self, text: &str) -> Result<(), SlackError> {
        let body = serde_json::json!({
            "channel": self.config.channel,
            "text": text,
            "mrkdwn": true,
        });

        debug!("posting {} chars to {}", text.len(), self.config.channel);

        let response: ApiResponse = self
            .client
            .post(format!("{}/chat.postMessage", self.config.base_url))
            .bearer_auth(&self.config.token)
            .json(&body)
            .send()
            .await?
            .json()
            .await?;

        response.into_result()?;
        info!("digest delivered to {}", self.config.channel);
        Ok(())
    }

    /// Verify the token; returns the workspace name when known
    pub async fn auth_test(&self) -> Result<Option<String>, SlackError> {
        let response: ApiResponse = self
            .client
            .post(format!("{}/auth.test", self.config.base_url))
            .bearer_auth(&self.config.token)
            .send()
            .await?
            .json()
            .await?;

        Ok(response.into_result()?.team)
    }
}
