//! Authentication header construction.
//!
//! # Responsibilities
//! - Capture one timestamp per request
//! - Sign the request with that timestamp
//! - Emit the full header set expected by the wallet API

use std::collections::HashMap;

use chrono::{SecondsFormat, Utc};

use crate::auth::signer::sign;
use crate::auth::AuthResult;
use crate::config::Credentials;

pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const HEADER_ACCESS_KEY: &str = "OK-ACCESS-KEY";
pub const HEADER_SIGN: &str = "OK-ACCESS-SIGN";
pub const HEADER_TIMESTAMP: &str = "OK-ACCESS-TIMESTAMP";
pub const HEADER_PASSPHRASE: &str = "OK-ACCESS-PASSPHRASE";
pub const HEADER_PROJECT: &str = "OK-ACCESS-PROJECT";

/// Current UTC time as ISO-8601 with millisecond precision (`2024-01-01T00:00:00.000Z`).
pub fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// A fully signed request, built fresh for every call.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    /// Upper-case HTTP verb.
    pub method: String,
    /// Request path including version prefix and query string.
    pub path: String,
    /// Serialized body exactly as signed, if any.
    pub body: Option<String>,
    /// Timestamp fed into the signature and emitted as a header.
    pub timestamp: String,
    /// Base64 HMAC-SHA256 signature.
    pub signature: String,
    /// Header name → value.
    pub headers: HashMap<&'static str, String>,
}

impl SignedRequest {
    /// Look up a header value by name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

/// Builds signed header sets from a set of credentials.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    credentials: Credentials,
}

impl RequestBuilder {
    /// Create a new builder.
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// Get the API key.
    pub fn access_key(&self) -> &str {
        &self.credentials.access_key
    }

    /// Build the authentication headers for one request.
    ///
    /// When `timestamp` is `None` the current time is captured here; either way
    /// the same string is used for the signature and the timestamp header.
    /// The project header is always present, empty when no project is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the secret key is empty.
    pub fn build_headers(
        &self,
        method: &str,
        path: &str,
        body: Option<&str>,
        timestamp: Option<String>,
    ) -> AuthResult<SignedRequest> {
        let timestamp = timestamp.unwrap_or_else(iso_timestamp);
        let signature = sign(
            &self.credentials.secret_key,
            &timestamp,
            method,
            path,
            body.unwrap_or(""),
        )?;

        let headers = HashMap::from([
            (HEADER_CONTENT_TYPE, "application/json".to_string()),
            (HEADER_ACCESS_KEY, self.credentials.access_key.clone()),
            (HEADER_SIGN, signature.clone()),
            (HEADER_TIMESTAMP, timestamp.clone()),
            (HEADER_PASSPHRASE, self.credentials.passphrase.clone()),
            (
                HEADER_PROJECT,
                self.credentials.project_id.clone().unwrap_or_default(),
            ),
        ]);

        Ok(SignedRequest {
            method: method.to_string(),
            path: path.to_string(),
            body: body.map(str::to_string),
            timestamp,
            signature,
            headers,
        })
    }
}
