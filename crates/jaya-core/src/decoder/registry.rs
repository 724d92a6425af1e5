//! Routing from event type to decoder.

use std::collections::HashMap;

use super::{IssuesDecoder, IssuesDevstreamActivityDecoder, PayloadDecoder};
use crate::error::{RelayError, Result};
use crate::models::Message;

/// Maps routing keys to payload decoders.
///
/// Built once at startup and shared read-only across requests.
#[derive(Default)]
pub struct DecoderRegistry {
    decoders: HashMap<&'static str, Box<dyn PayloadDecoder>>,
}

impl DecoderRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with every built-in decoder registered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(IssuesDecoder);
        registry.register(IssuesDevstreamActivityDecoder);
        registry
    }

    /// Registers a decoder under its event type.
    ///
    /// Returns the decoder previously registered for that key, if any.
    pub fn register<D>(&mut self, decoder: D) -> Option<Box<dyn PayloadDecoder>>
    where
        D: PayloadDecoder + 'static,
    {
        self.decoders.insert(decoder.event_type(), Box::new(decoder))
    }

    pub fn contains(&self, event_type: &str) -> bool {
        self.decoders.contains_key(event_type)
    }

    /// Registered event types, sorted.
    pub fn event_types(&self) -> Vec<&'static str> {
        let mut types: Vec<_> = self.decoders.keys().copied().collect();
        types.sort_unstable();
        types
    }

    /// Decodes `body` with the decoder registered for `event_type`.
    pub fn dispatch(&self, event_type: &str, body: &[u8]) -> Result<Message> {
        let decoder = self
            .decoders
            .get(event_type)
            .ok_or_else(|| RelayError::UnsupportedEventType(event_type.to_string()))?;

        decoder.decode(body)
    }
}

impl std::fmt::Debug for DecoderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecoderRegistry")
            .field("event_types", &self.event_types())
            .finish()
    }
}
