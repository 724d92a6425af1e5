//! HTTP route handlers.

pub mod health;
pub mod hooks;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Builds the full application router.
///
/// The body limit caps buffering in the `Bytes` extractor, so oversized
/// requests are cut off while streaming. The handlers turn that rejection into
/// the same `{}` reply as any other delivery error.
pub fn router(state: AppState) -> Router {
    let max_body_size = state.config.max_body_size;

    Router::new()
        .route("/health", get(health::health_check))
        .route("/version", get(health::version))
        .route("/hooks", post(hooks::handle_hook))
        .route("/nudges", post(hooks::handle_nudge))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(max_body_size)),
        )
        .with_state(state)
}
