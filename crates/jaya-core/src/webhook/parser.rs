//! Inbound delivery parsing.

use bytes::Bytes;
use http::HeaderMap;

use crate::crypto::MAX_DELIVERY_SIZE;
use crate::error::{RelayError, Result};
use crate::models::Delivery;
use crate::webhook::{HubSignatureVerifier, WebhookSecret};

/// Names of the headers one inbound source uses for its metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderScheme {
    pub signature: &'static str,
    pub event: &'static str,
    pub delivery: &'static str,
}

impl HeaderScheme {
    /// GitHub-style repository hooks.
    pub const GITHUB: HeaderScheme = HeaderScheme {
        signature: "X-Hub-Signature",
        event: "X-GitHub-Event",
        delivery: "X-GitHub-Delivery",
    };

    /// Nudge activity-stream notifications.
    pub const NUDGE: HeaderScheme = HeaderScheme {
        signature: "X-Hub-Signature",
        event: "Activity-Type",
        delivery: "X-Nudge-Delivery",
    };
}

/// Extracts and authenticates deliveries for one header scheme.
#[derive(Debug, Clone)]
pub struct DeliveryParser {
    secret: WebhookSecret,
    scheme: HeaderScheme,
    max_body_size: usize,
}

impl DeliveryParser {
    /// Creates a parser with the default body size limit.
    pub fn new(secret: WebhookSecret, scheme: HeaderScheme) -> Self {
        Self {
            secret,
            scheme,
            max_body_size: MAX_DELIVERY_SIZE,
        }
    }

    /// Overrides the maximum accepted body size.
    pub fn with_max_body_size(mut self, max_body_size: usize) -> Self {
        self.max_body_size = max_body_size;
        self
    }

    pub fn scheme(&self) -> HeaderScheme {
        self.scheme
    }

    /// Parses one inbound request into a verified [`Delivery`].
    ///
    /// All required headers are checked before the body is looked at. The
    /// signature is verified over `body` exactly as received.
    pub fn parse(&self, headers: &HeaderMap, body: Bytes) -> Result<Delivery> {
        let (signature, event_type, delivery_id) = self.required_headers(headers)?;

        if body.len() > self.max_body_size {
            return Err(self.too_large());
        }

        HubSignatureVerifier::new(&self.secret).check(signature, &body)?;

        Ok(Delivery {
            signature: signature.to_string(),
            event_type: event_type.to_string(),
            delivery_id: delivery_id.to_string(),
            body,
        })
    }

    /// Error for a request whose body was cut off at the transport before it
    /// could be read in full.
    ///
    /// Missing headers still take precedence over the size check.
    pub fn oversized(&self, headers: &HeaderMap) -> RelayError {
        match self.required_headers(headers) {
            Ok(_) => self.too_large(),
            Err(e) => e,
        }
    }

    fn required_headers<'h>(&self, headers: &'h HeaderMap) -> Result<(&'h str, &'h str, &'h str)> {
        Ok((
            required_header(headers, self.scheme.signature)?,
            required_header(headers, self.scheme.event)?,
            required_header(headers, self.scheme.delivery)?,
        ))
    }

    fn too_large(&self) -> RelayError {
        RelayError::PayloadTooLarge {
            limit: self.max_body_size,
        }
    }
}

/// Reads a header as visible ASCII. Empty or unreadable values count as absent.
fn required_header<'h>(headers: &'h HeaderMap, name: &'static str) -> Result<&'h str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .ok_or(RelayError::MissingField(name))
}
