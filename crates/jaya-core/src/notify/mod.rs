//! Outbound chat notification.

pub mod slack;

pub use slack::SlackNotifier;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Message;

/// Delivers a rendered message to a chat service.
///
/// Implementations:
/// - SlackNotifier: Slack-compatible incoming webhook
#[async_trait]
pub trait ChatNotifier: Send + Sync {
    /// Posts one message.
    async fn notify(&self, message: &Message) -> Result<()>;
}
