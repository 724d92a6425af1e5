//! Test utilities for jaya-server integration tests.

use async_trait::async_trait;
use axum::Router;
use jaya_core::config::RelayConfig;
use jaya_core::crypto::{MAX_DELIVERY_SIZE, sign_body};
use jaya_core::decoder::DecoderRegistry;
use jaya_core::models::Message;
use jaya_core::notify::ChatNotifier;
use jaya_core::webhook::WebhookSecret;
use jaya_core::{RelayError, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, mpsc};

use crate::routes;
use crate::state::AppState;
use crate::worker::NotifyJob;

/// Webhook secret used in all tests.
pub const TEST_SECRET: &str = "test-webhook-secret";

/// Test server configuration for integration tests.
pub struct TestConfig {
    pub notify_rx: mpsc::Receiver<NotifyJob>,
}

/// Signs a body with [`TEST_SECRET`].
pub fn sign(body: &[u8]) -> String {
    sign_body(TEST_SECRET.as_bytes(), body)
}

/// Notifier that records every message instead of posting it.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    messages: Arc<Mutex<Vec<String>>>,
    fail_on: Option<String>,
    delay: Option<Duration>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails (without recording) whenever the message text equals `text`.
    pub fn failing_on(text: &str) -> Self {
        Self {
            fail_on: Some(text.to_string()),
            ..Self::default()
        }
    }

    /// Sleeps for `delay` before handling each message, like a slow chat service.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub async fn messages(&self) -> Vec<String> {
        self.messages.lock().await.clone()
    }
}

#[async_trait]
impl ChatNotifier for RecordingNotifier {
    async fn notify(&self, message: &Message) -> Result<()> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_on.as_deref() == Some(message.as_str()) {
            return Err(RelayError::Notify("simulated failure".to_string()));
        }
        self.messages.lock().await.push(message.to_string());
        Ok(())
    }
}

/// Creates a relay configuration for tests.
pub fn test_relay_config(max_body_size: usize) -> RelayConfig {
    RelayConfig {
        webhook_secret: WebhookSecret::new(TEST_SECRET).unwrap(),
        chat_webhook_url: "http://localhost:9/services/test".parse().unwrap(),
        max_body_size,
        notify_timeout: Duration::from_secs(1),
    }
}

/// Creates test application state with the default decoders.
pub fn setup_test_state(max_body_size: usize) -> (AppState, TestConfig) {
    let (notify_tx, notify_rx) = mpsc::channel(100);

    let state = AppState::new(
        test_relay_config(max_body_size),
        DecoderRegistry::with_defaults(),
        notify_tx,
    );

    (state, TestConfig { notify_rx })
}

/// Creates a test application.
/// Returns the router and test configuration.
pub fn create_test_app_with_state() -> (Router, TestConfig) {
    create_test_app_with_limit(MAX_DELIVERY_SIZE)
}

/// Creates a test application with a custom body size limit.
pub fn create_test_app_with_limit(max_body_size: usize) -> (Router, TestConfig) {
    let (state, config) = setup_test_state(max_body_size);
    (routes::router(state), config)
}
