//! Relay configuration loaded from the environment.

use std::time::Duration;

use url::Url;

use crate::crypto::MAX_DELIVERY_SIZE;
use crate::error::{RelayError, Result};
use crate::notify::slack::DEFAULT_NOTIFY_TIMEOUT;
use crate::webhook::WebhookSecret;

/// Process-wide relay configuration.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Shared secret for inbound signature verification.
    pub webhook_secret: WebhookSecret,
    /// Incoming webhook URL of the chat service.
    pub chat_webhook_url: Url,
    /// Largest accepted request body, in bytes.
    pub max_body_size: usize,
    /// Timeout for each outbound chat POST.
    pub notify_timeout: Duration,
}

impl RelayConfig {
    /// Loads configuration from environment variables.
    ///
    /// Required: `JAYA_WEBHOOK_SECRET`, `JAYA_CHAT_WEBHOOK_URL`.
    /// Optional: `JAYA_MAX_BODY_BYTES`, `JAYA_NOTIFY_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        let webhook_secret = std::env::var("JAYA_WEBHOOK_SECRET")
            .map_err(|_| RelayError::Configuration("JAYA_WEBHOOK_SECRET is not set".to_string()))
            .and_then(WebhookSecret::new)?;

        let chat_webhook_url = std::env::var("JAYA_CHAT_WEBHOOK_URL").map_err(|_| {
            RelayError::Configuration("JAYA_CHAT_WEBHOOK_URL is not set".to_string())
        })?;
        let chat_webhook_url = parse_webhook_url(&chat_webhook_url)?;

        let max_body_size = match std::env::var("JAYA_MAX_BODY_BYTES") {
            Ok(val) => match val.parse::<usize>() {
                Ok(v) if v > 0 => v,
                _ => {
                    return Err(RelayError::Configuration(format!(
                        "Invalid JAYA_MAX_BODY_BYTES: {}",
                        val
                    )));
                }
            },
            Err(_) => MAX_DELIVERY_SIZE,
        };

        let notify_timeout = match std::env::var("JAYA_NOTIFY_TIMEOUT_SECS") {
            Ok(val) => val.parse::<u64>().map(Duration::from_secs).map_err(|_| {
                RelayError::Configuration(format!("Invalid JAYA_NOTIFY_TIMEOUT_SECS: {}", val))
            })?,
            Err(_) => DEFAULT_NOTIFY_TIMEOUT,
        };

        Ok(Self {
            webhook_secret,
            chat_webhook_url,
            max_body_size,
            notify_timeout,
        })
    }
}

/// Parses the outbound webhook URL. Only http and https are accepted.
fn parse_webhook_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)
        .map_err(|e| RelayError::Configuration(format!("Invalid JAYA_CHAT_WEBHOOK_URL: {}", e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(RelayError::Configuration(format!(
            "JAYA_CHAT_WEBHOOK_URL must use http or https, got {}",
            other
        ))),
    }
}
