//! API credentials.
//!
//! # Security
//! - Credentials are loaded ONLY from environment variables
//! - Secrets are never logged; `Debug` redacts them
//! - Loaded once at startup and passed explicitly to the client

use crate::auth::{AuthError, AuthResult};

/// Environment variable names for the API key, primary name first.
pub const ACCESS_KEY_ENV_VARS: [&str; 2] = ["OK_ACCESS_KEY", "API_KEY"];
/// Environment variable names for the secret key.
pub const SECRET_KEY_ENV_VARS: [&str; 2] = ["OK_ACCESS_SECRET", "SECRET_KEY"];
/// Environment variable names for the passphrase.
pub const PASSPHRASE_ENV_VARS: [&str; 2] = ["OK_ACCESS_PASSPHRASE", "PASSPHRASE"];
/// Environment variable names for the optional project id.
pub const PROJECT_ENV_VARS: [&str; 2] = ["OK_ACCESS_PROJECT", "PROJECT_ID"];

/// Wallet API credentials. Immutable for the process lifetime.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// API key identifier.
    pub access_key: String,
    /// HMAC secret.
    pub secret_key: String,
    /// Passphrase chosen when the key was created.
    pub passphrase: String,
    /// Developer-portal project id.
    pub project_id: Option<String>,
}

impl Credentials {
    /// Create credentials, rejecting empty required fields.
    ///
    /// An empty project id is treated as absent.
    pub fn new(
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        passphrase: impl Into<String>,
        project_id: Option<String>,
    ) -> AuthResult<Self> {
        let creds = Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            passphrase: passphrase.into(),
            project_id: project_id.filter(|p| !p.is_empty()),
        };

        if creds.access_key.is_empty() {
            return Err(AuthError::MissingCredential("access key"));
        }
        if creds.secret_key.is_empty() {
            return Err(AuthError::MissingSecret);
        }
        if creds.passphrase.is_empty() {
            return Err(AuthError::MissingCredential("passphrase"));
        }
        Ok(creds)
    }

    /// Load credentials from the process environment.
    pub fn from_env() -> AuthResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load credentials through an arbitrary variable lookup.
    ///
    /// For each field the first non-empty variable in its name list wins.
    pub fn from_lookup<F>(lookup: F) -> AuthResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let first = |names: &[&str]| {
            names
                .iter()
                .filter_map(|name| lookup(name))
                .find(|value| !value.is_empty())
        };

        let access_key = first(&ACCESS_KEY_ENV_VARS)
            .ok_or(AuthError::MissingCredential(ACCESS_KEY_ENV_VARS[0]))?;
        let secret_key = first(&SECRET_KEY_ENV_VARS).ok_or(AuthError::MissingSecret)?;
        let passphrase = first(&PASSPHRASE_ENV_VARS)
            .ok_or(AuthError::MissingCredential(PASSPHRASE_ENV_VARS[0]))?;
        let project_id = first(&PROJECT_ENV_VARS);

        Self::new(access_key, secret_key, passphrase, project_id)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("passphrase", &"<redacted>")
            .field("project_id", &self.project_id)
            .finish()
    }
}
