//! Application state for the Jaya server.

use jaya_core::config::RelayConfig;
use jaya_core::decoder::DecoderRegistry;
use jaya_core::webhook::{DeliveryParser, HeaderScheme};
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::worker::NotifyJob;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Relay configuration.
    pub config: Arc<RelayConfig>,
    /// Decoders for every supported event type, shared by all routes.
    pub registry: Arc<DecoderRegistry>,
    /// Parser for GitHub-style repository hooks.
    pub hook_parser: Arc<DeliveryParser>,
    /// Parser for nudge activity notifications.
    pub nudge_parser: Arc<DeliveryParser>,
    /// Channel for sending rendered messages to the notify worker.
    pub notify_tx: mpsc::Sender<NotifyJob>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        config: RelayConfig,
        registry: DecoderRegistry,
        notify_tx: mpsc::Sender<NotifyJob>,
    ) -> Self {
        let parser = |scheme| {
            Arc::new(
                DeliveryParser::new(config.webhook_secret.clone(), scheme)
                    .with_max_body_size(config.max_body_size),
            )
        };
        let hook_parser = parser(HeaderScheme::GITHUB);
        let nudge_parser = parser(HeaderScheme::NUDGE);

        Self {
            config: Arc::new(config),
            registry: Arc::new(registry),
            hook_parser,
            nudge_parser,
            notify_tx,
        }
    }
}
