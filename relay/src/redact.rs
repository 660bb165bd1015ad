//! Log-side redaction and body previews.
//!
//! Everything here feeds log lines only; nothing in this module touches
//! what is actually forwarded to the target.

use crate::headers::ForwardHeaders;

/// Maximum characters of a body rendered into a log line.
pub const BODY_PREVIEW_CHARS: usize = 1000;

/// Placeholder written in place of sensitive header values.
const REDACTED: &str = "[REDACTED]";

/// Name fragments that mark a header value as sensitive.
const SENSITIVE_FRAGMENTS: &[&str] = &["signature", "auth", "token"];

/// Whether a header's value must not appear in logs, judged by name.
pub fn is_sensitive(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    SENSITIVE_FRAGMENTS.iter().any(|f| name.contains(f))
}

/// Copy of a header set with sensitive values masked, for logging.
pub fn redact_headers(headers: &ForwardHeaders) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let value = if is_sensitive(name) {
                REDACTED.to_string()
            } else {
                value.to_string()
            };
            (name.to_string(), value)
        })
        .collect()
}

/// Render a body for logging.
///
/// JSON bodies are pretty-printed, anything else is decoded lossily as
/// text, and the result is capped at [`BODY_PREVIEW_CHARS`] characters.
pub fn body_preview(body: &[u8]) -> String {
    let rendered = match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(value) => serde_json::to_string_pretty(&value)
            .unwrap_or_else(|_| String::from_utf8_lossy(body).into_owned()),
        Err(_) => String::from_utf8_lossy(body).into_owned(),
    };

    if rendered.chars().count() <= BODY_PREVIEW_CHARS {
        rendered
    } else {
        rendered.chars().take(BODY_PREVIEW_CHARS).collect()
    }
}
