//! Inbound webhook endpoints.
//!
//! Both endpoints run the same pipeline: parse and verify the delivery,
//! render it through the shared decoder registry, then hand the message to the
//! notify worker. Rejections are logged here in full and answered with an
//! empty JSON object.

use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use jaya_core::{RelayError, webhook::DeliveryParser};
use serde_json::{Value, json};
use tokio::sync::mpsc::error::TrySendError;

use crate::state::AppState;
use crate::worker::NotifyJob;

/// Handler for GitHub repository hooks.
///
/// POST /hooks
pub async fn handle_hook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> impl IntoResponse {
    relay_delivery(&state, &state.hook_parser, &headers, body)
}

/// Handler for nudge activity notifications.
///
/// POST /nudges
pub async fn handle_nudge(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> impl IntoResponse {
    relay_delivery(&state, &state.nudge_parser, &headers, body)
}

fn relay_delivery(
    state: &AppState,
    parser: &DeliveryParser,
    headers: &HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> (StatusCode, Json<Value>) {
    let delivery_id = headers
        .get(parser.scheme().delivery)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    // 1. Buffer the body; the router's limit stops it at max_body_size
    let body = match body {
        Ok(body) => body,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            let e = parser.oversized(headers);
            tracing::warn!(delivery_id, "Rejected delivery: {}", e);
            return reject(&e);
        }
        Err(rejection) => {
            tracing::warn!(delivery_id, "Failed to read delivery body: {}", rejection);
            return (StatusCode::BAD_REQUEST, Json(json!({})));
        }
    };

    // 2. Extract headers and verify signature
    let delivery = match parser.parse(headers, body) {
        Ok(delivery) => delivery,
        Err(e) => {
            tracing::warn!(delivery_id, "Rejected delivery: {}", e);
            return reject(&e);
        }
    };

    // 3. Route to a decoder and render the message
    let message = match state.registry.dispatch(&delivery.event_type, &delivery.body) {
        Ok(message) => message,
        Err(e) => {
            tracing::warn!(
                delivery_id = %delivery.delivery_id,
                event_type = %delivery.event_type,
                "Failed processing delivery: {}",
                e
            );
            return reject(&e);
        }
    };

    tracing::info!(
        delivery_id = %delivery.delivery_id,
        event_type = %delivery.event_type,
        bytes = delivery.len(),
        "Accepted delivery"
    );

    // 4. Queue the outbound post; failures past this point never reach the sender
    let job = NotifyJob {
        delivery_id: delivery.delivery_id,
        event_type: delivery.event_type,
        message,
    };
    match state.notify_tx.try_send(job) {
        Ok(()) => {}
        Err(TrySendError::Full(job)) => {
            tracing::warn!("Notify queue full, dropping message for delivery {}", job.delivery_id);
        }
        Err(TrySendError::Closed(job)) => {
            tracing::error!("Notify worker stopped, dropping message for delivery {}", job.delivery_id);
        }
    }

    (StatusCode::OK, Json(json!({})))
}

/// Maps a core error to a response without echoing its detail.
fn reject(error: &RelayError) -> (StatusCode, Json<Value>) {
    (error_status(error), Json(json!({})))
}

fn error_status(error: &RelayError) -> StatusCode {
    match error {
        RelayError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        RelayError::Configuration(_) | RelayError::Notify(_) => StatusCode::INTERNAL_SERVER_ERROR,
        RelayError::MissingField(_)
        | RelayError::InvalidSignatureFormat
        | RelayError::AuthenticationFailure
        | RelayError::DecodeFailure { .. }
        | RelayError::UnsupportedEventType(_) => StatusCode::BAD_REQUEST,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_map_to_bad_request() {
        let errors = [
            RelayError::MissingField("X-Hub-Signature"),
            RelayError::InvalidSignatureFormat,
            RelayError::AuthenticationFailure,
            RelayError::UnsupportedEventType("push".to_string()),
        ];

        for error in &errors {
            assert_eq!(error_status(error), StatusCode::BAD_REQUEST, "{}", error);
        }
    }

    #[test]
    fn test_oversized_payload_maps_to_413() {
        let error = RelayError::PayloadTooLarge { limit: 5 };
        assert_eq!(error_status(&error), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
