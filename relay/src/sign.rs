//! Outbound payload signing.
//!
//! When a secret is configured the relay signs each forwarded body with
//! HMAC-SHA256 and presents the digest in the GitHub-style
//! `X-Hub-Signature-256` header, so the target can verify the payload
//! against the secret it shares with the relay.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the relay's own signature on the forwarded payload.
pub const SIGNATURE_HEADER: &str = "X-Hub-Signature-256";

/// Name fragment that marks a header as signature-bearing. Any inbound
/// header whose name contains it is stripped before forwarding.
pub const SIGNATURE_NAME_FRAGMENT: &str = "signature";

/// Compute the signature header value for a body: `sha256=` followed by the
/// lowercase hex HMAC-SHA256 of the raw bytes.
pub fn signature_header(secret: &str, body: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(body);
    format!("sha256={}", hex::encode(mac.finalize().into_bytes()))
}
