//! Call outcomes and error definitions.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Which boundary a failed call tripped on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// The request could not be signed or serialized; nothing was sent.
    Request,
    /// Network error or timeout.
    Transport,
    /// Non-2xx HTTP status.
    Http(u16),
    /// Well-formed response whose `code` is not `"0"`.
    Application(String),
    /// Response body was not valid JSON.
    Parse,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::Request => write!(f, "request"),
            FailureKind::Transport => write!(f, "transport"),
            FailureKind::Http(status) => write!(f, "HTTP {}", status),
            FailureKind::Application(code) => write!(f, "application code {}", code),
            FailureKind::Parse => write!(f, "parse"),
        }
    }
}

/// Failure payload of an API call.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} error: {message}")]
pub struct ApiFailure {
    /// Failure classification.
    pub kind: FailureKind,
    /// Server message when present, otherwise a generic description.
    pub message: String,
    /// Raw response body, when one was received.
    pub raw_response: Option<String>,
}

impl ApiFailure {
    /// Create a failure.
    pub fn new(kind: FailureKind, message: impl Into<String>, raw_response: Option<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            raw_response,
        }
    }

    /// Failure before anything was sent.
    pub fn request(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Request, message, None)
    }

    /// Network-level failure.
    pub fn transport(err: &reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("request timed out: {}", err)
        } else {
            err.to_string()
        };
        Self::new(FailureKind::Transport, message, None)
    }
}

/// Outcome of exactly one API call.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResult {
    Success(Value),
    Failure(ApiFailure),
}

impl ApiResult {
    /// Classify an HTTP response.
    ///
    /// Order of checks: HTTP status, JSON well-formedness, application `code`.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let parsed = serde_json::from_str::<Value>(body);

        if !status.is_success() {
            let message = parsed
                .as_ref()
                .ok()
                .and_then(server_message)
                .unwrap_or_else(|| format!("HTTP {}", status));
            return ApiResult::Failure(ApiFailure::new(
                FailureKind::Http(status.as_u16()),
                message,
                Some(body.to_string()),
            ));
        }

        let payload = match parsed {
            Ok(payload) => payload,
            Err(e) => {
                return ApiResult::Failure(ApiFailure::new(
                    FailureKind::Parse,
                    format!("malformed JSON response: {}", e),
                    Some(body.to_string()),
                ))
            }
        };

        match application_code(&payload) {
            Some(code) if code != "0" => {
                let message =
                    server_message(&payload).unwrap_or_else(|| format!("application error code {}", code));
                ApiResult::Failure(ApiFailure::new(
                    FailureKind::Application(code),
                    message,
                    Some(body.to_string()),
                ))
            }
            _ => ApiResult::Success(payload),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ApiResult::Success(_))
    }

    /// Convert into a standard `Result`.
    pub fn into_result(self) -> Result<Value, ApiFailure> {
        match self {
            ApiResult::Success(payload) => Ok(payload),
            ApiResult::Failure(failure) => Err(failure),
        }
    }
}

/// Application-level status code, accepting both `"0"` and `0`.
pub fn application_code(payload: &Value) -> Option<String> {
    match payload.get("code")? {
        Value::String(code) => Some(code.clone()),
        Value::Number(code) => Some(code.to_string()),
        _ => None,
    }
}

fn server_message(payload: &Value) -> Option<String> {
    payload
        .get("msg")
        .and_then(Value::as_str)
        .filter(|msg| !msg.is_empty())
        .map(str::to_string)
}

/// Errors that can occur while constructing a client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Base URL could not be parsed.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// HTTP client could not be built.
    #[error("failed to create HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type for client construction.
pub type ClientResult<T> = Result<T, ClientError>;
