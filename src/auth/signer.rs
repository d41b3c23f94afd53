//! HMAC-SHA256 request signatures.
//!
//! The exchange verifies `base64(HMAC_SHA256(secret, timestamp + method + path + body))`.
//! Any byte of difference in the pre-sign string (whitespace in the body,
//! reordered query parameters) produces a different signature, so callers must
//! pass exactly the strings they transmit.

use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::auth::{AuthError, AuthResult};

/// HMAC-SHA256 type alias.
pub type HmacSha256 = Hmac<Sha256>;

/// Build the canonical pre-sign string.
///
/// `body` is `""` for bodyless requests.
pub fn pre_sign_string(timestamp: &str, method: &str, path: &str, body: &str) -> String {
    let mut message = String::with_capacity(timestamp.len() + method.len() + path.len() + body.len());
    message.push_str(timestamp);
    message.push_str(method);
    message.push_str(path);
    message.push_str(body);
    message
}

/// Sign a request and return the standard base64 encoded digest.
///
/// # Arguments
/// * `secret_key` - Raw secret; its UTF-8 bytes are the HMAC key
/// * `timestamp` - ISO-8601 timestamp, also sent as the timestamp header
/// * `method` - Upper-case HTTP verb
/// * `path` - Request path including version prefix and query string
/// * `body` - Serialized JSON body, or `""`
///
/// # Errors
///
/// Returns [`AuthError::MissingSecret`] if `secret_key` is empty.
pub fn sign(
    secret_key: &str,
    timestamp: &str,
    method: &str,
    path: &str,
    body: &str,
) -> AuthResult<String> {
    if secret_key.is_empty() {
        return Err(AuthError::MissingSecret);
    }

    let mut mac = HmacSha256::new_from_slice(secret_key.as_bytes())
        .map_err(|e| AuthError::Hmac(e.to_string()))?;
    mac.update(pre_sign_string(timestamp, method, path, body).as_bytes());

    Ok(base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes()))
}
