//! The forwarding pipeline.
//!
//! An inbound webhook's headers are copied (minus Host), signature-bearing
//! headers are stripped and optionally replaced with a signature computed
//! from the relay's own secret, and the untouched body is POSTed to the
//! configured target. Exactly one attempt is made per inbound request; the
//! caller maps the outcome to a response envelope.

use std::time::Duration;

use axum::http::HeaderMap;
use reqwest::Client;
use tracing::{error, info};

use crate::config::RelayConfig;
use crate::error::ForwardError;
use crate::headers::ForwardHeaders;
use crate::redact::{body_preview, redact_headers};
use crate::sign::{signature_header, SIGNATURE_HEADER, SIGNATURE_NAME_FRAGMENT};

/// Total time allowed for one outbound exchange, connect through body.
pub const TARGET_TIMEOUT: Duration = Duration::from_secs(30);

/// The downstream response, relayed back to the original caller.
#[derive(Debug)]
pub struct TargetReply {
    /// HTTP status returned by the target
    pub status: u16,

    /// Target response body decoded as text
    pub body: String,
}

/// Build the outbound header set from the inbound one.
///
/// Applied in order: Host exclusion, the signature policy (inbound
/// signatures always stripped, a fresh one added when a secret is
/// configured), the Content-Type default, and the opt-in event-header shim.
/// The body is only read here, never changed; it participates because the
/// signature covers the raw bytes.
pub fn build_forward_headers(
    inbound: &HeaderMap,
    config: &RelayConfig,
    body: &[u8],
) -> ForwardHeaders {
    let mut headers = ForwardHeaders::from_header_map(inbound);

    // The target connection gets its own Host.
    headers.remove("host");

    // Inbound signatures were computed with the caller's secret and would
    // never verify at the target.
    headers.remove_containing(SIGNATURE_NAME_FRAGMENT);

    if let Some(secret) = config.secret.as_deref().filter(|s| !s.is_empty()) {
        headers.set(SIGNATURE_HEADER, signature_header(secret, body));
    }

    if !headers.contains("content-type") {
        headers.push("Content-Type", "application/json");
    }

    if let Some(event) = config.default_github_event.as_deref() {
        if !headers.contains("x-github-event") {
            headers.push("X-GitHub-Event", event);
        }
    }

    headers
}

/// Forward one webhook to the configured target.
///
/// The body is sent byte-for-byte as received; only the headers differ from
/// the inbound request per [`build_forward_headers`].
pub async fn forward_webhook(
    client: &Client,
    config: &RelayConfig,
    request_id: &str,
    inbound: &HeaderMap,
    body: &[u8],
) -> Result<TargetReply, ForwardError> {
    let target_url = config.target_url();
    let headers = build_forward_headers(inbound, config, body);

    info!(
        request_id = %request_id,
        target_url = %target_url,
        headers = ?redact_headers(&headers),
        body_length = body.len(),
        "forwarding_to_target"
    );

    let mut request = client.post(&target_url).timeout(TARGET_TIMEOUT);
    for (name, value) in headers.iter() {
        request = request.header(name, value);
    }

    let response = request.body(body.to_vec()).send().await.map_err(|e| {
        error!(
            request_id = %request_id,
            target_url = %target_url,
            error = %e,
            "target_request_failed"
        );
        ForwardError::from_reqwest(e)
    })?;

    let status = response.status().as_u16();
    let response_headers = ForwardHeaders::from_header_map(response.headers());

    let response_body = response.text().await.map_err(|e| {
        error!(
            request_id = %request_id,
            target_status = status,
            error = %e,
            "target_response_read_failed"
        );
        ForwardError::from_reqwest(e)
    })?;

    info!(
        request_id = %request_id,
        target_status = status,
        headers = ?redact_headers(&response_headers),
        body = %body_preview(response_body.as_bytes()),
        "target_responded"
    );

    Ok(TargetReply {
        status,
        body: response_body,
    })
}
