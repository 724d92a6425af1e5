//! Payload decoders and the registry that routes deliveries to them.
//!
//! Each decoder projects the few fields it needs out of a JSON payload and
//! renders them into a [`Message`]. Decoders are registered by routing key
//! (the event or activity type header) in a [`DecoderRegistry`], which is
//! shared by every inbound route.

pub mod github;
pub mod nudge;
pub mod registry;

pub use github::IssuesDecoder;
pub use nudge::IssuesDevstreamActivityDecoder;
pub use registry::DecoderRegistry;

use serde::de::DeserializeOwned;

use crate::error::{RelayError, Result};
use crate::models::Message;

/// Turns the raw bytes of one event type into a chat message.
pub trait PayloadDecoder: Send + Sync {
    /// Routing key this decoder handles.
    fn event_type(&self) -> &'static str;

    /// Decodes the payload and renders its message.
    fn decode(&self, body: &[u8]) -> Result<Message>;
}

/// Deserializes a payload, tagging failures with the event type.
pub(crate) fn decode_json<T: DeserializeOwned>(event_type: &str, body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|source| RelayError::DecodeFailure {
        event_type: event_type.to_string(),
        source,
    })
}
