//! Relay failure taxonomy.
//!
//! A downstream HTTP error status is not a relay failure; it is relayed back
//! verbatim. Only the relay's own inability to complete the exchange is an
//! error here, split into the two cases callers see as 502 and 500.

use axum::http::StatusCode;
use thiserror::Error;

/// A failure of the relay itself while forwarding a webhook.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// The outbound call never completed: connect, DNS, TLS, timeout, or a
    /// failure while reading the target's response.
    #[error("target request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// Any other fault while preparing or issuing the outbound request.
    #[error("{0}")]
    Internal(String),
}

impl ForwardError {
    /// Classify an outbound client error. Request-construction faults are
    /// internal; anything that happened on the wire is transport.
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_builder() {
            ForwardError::Internal(err.to_string())
        } else {
            ForwardError::Transport(err)
        }
    }

    /// Status reported to the original caller for this failure.
    pub fn http_status(&self) -> StatusCode {
        match self {
            ForwardError::Transport(_) => StatusCode::BAD_GATEWAY,
            ForwardError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
