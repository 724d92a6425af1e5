//! Inbound delivery model.

use bytes::Bytes;

/// One inbound notification whose signature has been verified.
///
/// `body` holds the exact bytes the signature was checked against; decoders
/// read from it directly.
#[derive(Debug, Clone)]
pub struct Delivery {
    /// The signature header value, as received.
    pub signature: String,
    /// Routing key for the decoder registry.
    pub event_type: String,
    /// Sender-assigned delivery identifier. Surfaced for tracing only.
    pub delivery_id: String,
    /// Raw request body.
    pub body: Bytes,
}

impl Delivery {
    /// Size of the payload in bytes.
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
