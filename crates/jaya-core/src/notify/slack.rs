//! Slack-compatible incoming webhook client.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use url::Url;

use super::ChatNotifier;
use crate::error::{RelayError, Result};
use crate::models::Message;

/// Default timeout for a single webhook POST.
pub const DEFAULT_NOTIFY_TIMEOUT: Duration = Duration::from_secs(10);

/// Most bytes of an error response kept for the error message.
const MAX_ERROR_BODY_BYTES: usize = 512;

#[derive(Serialize)]
struct IncomingWebhookPayload<'a> {
    text: &'a str,
}

/// Posts `{"text": ...}` to an incoming webhook URL.
pub struct SlackNotifier {
    client: reqwest::Client,
    webhook_url: Url,
}

impl SlackNotifier {
    /// Creates a new notifier.
    pub fn new(webhook_url: Url, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("jaya/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RelayError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            webhook_url,
        })
    }
}

impl std::fmt::Debug for SlackNotifier {
    // Incoming webhook URLs embed a token; only the host is printed.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackNotifier")
            .field("host", &self.webhook_url.host_str())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ChatNotifier for SlackNotifier {
    async fn notify(&self, message: &Message) -> Result<()> {
        let response = self
            .client
            .post(self.webhook_url.clone())
            .json(&IncomingWebhookPayload {
                text: message.as_str(),
            })
            .send()
            .await
            .map_err(|e| RelayError::Notify(format!("Chat webhook request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = read_error_body(response).await;
            return Err(RelayError::Notify(format!(
                "Chat webhook error {}: {}",
                status, body
            )));
        }

        tracing::debug!("Posted message to chat webhook");
        Ok(())
    }
}

/// Reads at most [`MAX_ERROR_BODY_BYTES`] of an error response.
///
/// Read failures are ignored; the status alone is enough to report.
async fn read_error_body(mut response: reqwest::Response) -> String {
    let mut body = Vec::new();
    while body.len() < MAX_ERROR_BODY_BYTES {
        match response.chunk().await {
            Ok(Some(chunk)) => body.extend_from_slice(&chunk),
            _ => break,
        }
    }
    body.truncate(MAX_ERROR_BODY_BYTES);
    String::from_utf8_lossy(&body).into_owned()
}
