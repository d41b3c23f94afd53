//! Request authentication subsystem.
//!
//! # Data Flow
//! ```text
//! Credentials (loaded once at startup)
//!     → headers.rs (capture timestamp, assemble header set)
//!     → signer.rs (pre-sign string → HMAC-SHA256 → base64)
//!     → SignedRequest (headers + the exact body string that was signed)
//! ```
//!
//! # Security Constraints
//! - The secret key never leaves this module except as an HMAC key
//! - The timestamp header is the same string the signature was computed over
//! - The body is serialized once by the caller; the signed string is the sent string

pub mod headers;
pub mod signer;

pub use headers::{iso_timestamp, RequestBuilder, SignedRequest};
pub use signer::{pre_sign_string, sign, HmacSha256};

use thiserror::Error;

/// Errors raised while signing a request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The HMAC secret is missing or empty.
    #[error("secret key is missing or empty")]
    MissingSecret,

    /// A required credential field is missing or empty.
    #[error("credential {0} is missing or empty")]
    MissingCredential(&'static str),

    /// HMAC initialization failed.
    #[error("HMAC initialization failed: {0}")]
    Hmac(String),
}

/// Result type for signing operations.
pub type AuthResult<T> = Result<T, AuthError>;
