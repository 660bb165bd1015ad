//! Web layer for the relay.
//!
//! Two routes:
//! - `POST /webhook-proxy` forwards the request to the configured target
//! - `GET /health` reports liveness without touching the target
//!
//! Everything below the routes lives in [`crate::forward`]; this module
//! only wires handlers, body limit, and request tracing together.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub mod handlers;

pub use handlers::{health, webhook_proxy, AppState, HealthResponse, ProxyError, ProxySuccess};

/// Largest accepted inbound payload. GitHub caps webhook payloads at 25 MB,
/// so anything larger is not a webhook worth relaying.
pub const MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

/// Build the relay router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/webhook-proxy", post(webhook_proxy))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
