//! Error types for the Jaya core library.

use thiserror::Error;

/// Core error type for the relay pipeline.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Missing required header: {0}")]
    MissingField(&'static str),

    #[error("Malformed webhook signature")]
    InvalidSignatureFormat,

    #[error("Webhook verification failed")]
    AuthenticationFailure,

    #[error("Payload too large: exceeds limit of {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("Invalid {event_type} payload: {source}")]
    DecodeFailure {
        event_type: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unsupported event type: {0}")]
    UnsupportedEventType(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Notification failed: {0}")]
    Notify(String),
}

/// Result type alias for relay operations.
pub type Result<T> = std::result::Result<T, RelayError>;
