//! Liveness and version endpoints.

use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::state::AppState;

/// GET /health
///
/// Reports the routable event types and how much room the notify queue has
/// left. A queue at zero means new deliveries are being dropped.
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let notify_tx = &state.notify_tx;

    Json(json!({
        "status": "ok",
        "event_types": state.registry.event_types(),
        "notify_queue": {
            "available": notify_tx.capacity(),
            "capacity": notify_tx.max_capacity(),
        },
    }))
}

/// GET /version
pub async fn version() -> Json<Value> {
    Json(json!({
        "name": "jayad",
        "version": jaya_core::VERSION,
    }))
}
