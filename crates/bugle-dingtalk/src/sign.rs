//! Webhook request signing
//!
//! DingTalk robots in "sign" security mode require every request URL to
//! carry a millisecond timestamp plus an HMAC-SHA256 signature over
//! `"{timestamp}\n{secret}"`, keyed with the same secret, Base64-encoded
//! and then percent-encoded.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Current Unix time in milliseconds, as used for the `timestamp` parameter.
pub fn unix_timestamp_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Compute the percent-encoded signature for one request.
pub fn sign_request(secret: &str, timestamp_ms: i64) -> String {
    use base64::Engine;

    let string_to_sign = format!("{timestamp_ms}\n{secret}");
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("hmac key of any length is valid");
    mac.update(string_to_sign.as_bytes());
    let digest = mac.finalize().into_bytes();

    let encoded = base64::engine::general_purpose::STANDARD.encode(digest);
    urlencoding::encode(&encoded).into_owned()
}

/// Build the full webhook URL for one request.
///
/// `access_token` and `timestamp` are passed through raw; only the
/// signature needs percent-encoding.
pub fn signed_webhook_url(
    endpoint: &str,
    access_token: &str,
    secret: &str,
    timestamp_ms: i64,
) -> String {
    let sign = sign_request(secret, timestamp_ms);
    format!("{endpoint}?access_token={access_token}&timestamp={timestamp_ms}&sign={sign}")
}
