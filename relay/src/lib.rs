//! hookrelay - webhook-forwarding relay.
//!
//! Accepts a webhook POST on `/webhook-proxy`, rewrites its headers (the
//! caller's signature is stripped and, when a secret is configured,
//! replaced with one computed from the relay's own secret), forwards the
//! untouched body to a single configured target, and relays the target's
//! response back to the caller.
//!
//! ## Request flow
//!
//! ```text
//! Caller → POST /webhook-proxy → header rewrite → POST target → envelope back
//! ```

pub mod config;
pub mod error;
pub mod forward;
pub mod headers;
pub mod redact;
pub mod sign;
pub mod web;

// Re-export commonly used types
pub use config::RelayConfig;
pub use error::ForwardError;
pub use forward::{build_forward_headers, forward_webhook, TargetReply, TARGET_TIMEOUT};
pub use headers::ForwardHeaders;
pub use web::AppState;
