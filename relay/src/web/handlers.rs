//! Relay endpoint handlers.
//!
//! The proxy handler is deliberately thin:
//! 1. Log the inbound request (redacted)
//! 2. Hand off to the forwarding pipeline
//! 3. Map the outcome to the response envelope
//!
//! Logging is a side channel; it never changes what is forwarded or what
//! the caller gets back.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::RelayConfig;
use crate::forward::forward_webhook;
use crate::headers::ForwardHeaders;
use crate::redact::{body_preview, redact_headers};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RelayConfig>,
    pub client: reqwest::Client,
}

impl AppState {
    pub fn new(config: RelayConfig, client: reqwest::Client) -> Self {
        Self {
            config: Arc::new(config),
            client,
        }
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint. Answers locally, never touches the target.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Webhook Proxy
// =============================================================================

/// Envelope returned when the target was reached, whatever its status.
#[derive(Serialize)]
pub struct ProxySuccess {
    pub status: &'static str,
    pub target_status: u16,
    pub target_response: String,
}

/// Envelope returned when the relay itself failed.
#[derive(Serialize)]
pub struct ProxyError {
    pub status: &'static str,
    pub message: String,
}

/// Webhook proxy endpoint.
///
/// The response status mirrors whatever the target returned, including its
/// error statuses; 502 and 500 are reserved for the relay's own failures.
pub async fn webhook_proxy(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request_id = Uuid::new_v4().to_string();

    info!(
        request_id = %request_id,
        headers = ?redact_headers(&ForwardHeaders::from_header_map(&headers)),
        body = %body_preview(&body),
        body_length = body.len(),
        "webhook_received"
    );

    match forward_webhook(&state.client, &state.config, &request_id, &headers, &body).await {
        Ok(reply) => {
            let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::BAD_GATEWAY);
            (
                status,
                Json(ProxySuccess {
                    status: "success",
                    target_status: reply.status,
                    target_response: reply.body,
                }),
            )
                .into_response()
        }
        Err(e) => {
            let status = e.http_status();
            warn!(
                request_id = %request_id,
                status = status.as_u16(),
                error = %e,
                "relay_request_failed"
            );
            (
                status,
                Json(ProxyError {
                    status: "error",
                    message: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}
