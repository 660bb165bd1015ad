//! Configuration module for environment variable parsing.
//!
//! All behavior is driven by environment variables read once at startup.
//! Only the target base URL is required; everything else has a default or
//! is an opt-in feature that stays off when unset.

use std::env;
use std::path::PathBuf;

use anyhow::{bail, Result};

/// Relay configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Base URL of the downstream receiver (required)
    pub target_base_url: String,

    /// Path appended to the base URL when building the target URL
    pub target_endpoint: String,

    /// Secret for re-signing forwarded payloads. None leaves forwarded
    /// requests unsigned; inbound signatures are stripped either way.
    pub secret: Option<String>,

    /// Value injected as X-GitHub-Event when the inbound request lacks the
    /// header. None (the default) forwards such requests untouched.
    pub default_github_event: Option<String>,

    /// Port for the relay server to listen on
    pub port: u16,

    /// Optional file that receives a duplicate of the log stream
    pub log_file: Option<PathBuf>,
}

impl RelayConfig {
    /// Load configuration from environment variables.
    ///
    /// Fails when TARGET_BASE_URL is unset or empty; the relay has nowhere
    /// to forward to and must not start.
    pub fn from_env() -> Result<Self> {
        let target_base_url = env::var("TARGET_BASE_URL").unwrap_or_default();
        if target_base_url.is_empty() {
            bail!("TARGET_BASE_URL environment variable is required");
        }

        Ok(RelayConfig {
            target_base_url,

            target_endpoint: env::var("TARGET_ENDPOINT")
                .unwrap_or_else(|_| "/webhook".to_string()),

            // An empty SECRET behaves like no secret at all.
            secret: env::var("SECRET").ok().filter(|v| !v.is_empty()),

            default_github_event: env::var("DEFAULT_GITHUB_EVENT")
                .ok()
                .filter(|v| !v.is_empty()),

            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),

            log_file: env::var("LOG_FILE")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        })
    }

    /// The full downstream URL: base and endpoint joined by exactly one
    /// slash, regardless of how either side was written.
    pub fn target_url(&self) -> String {
        format!(
            "{}/{}",
            self.target_base_url.trim_end_matches('/'),
            self.target_endpoint.trim_start_matches('/')
        )
    }

    /// Whether forwarded payloads get a fresh signature.
    pub fn resigning_enabled(&self) -> bool {
        self.secret.as_deref().is_some_and(|s| !s.is_empty())
    }
}
