//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the client.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Remote API settings.
    pub api: ApiConfig,

    /// Batch asset query settings.
    pub asset_query: AssetQueryConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Wallet API endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Scheme and host of the exchange (e.g., "https://www.okx.com").
    pub base_url: String,

    /// Version prefix prepended to every endpoint (e.g., "/api/v5").
    pub api_prefix: String,

    /// Request timeout (total time for request/response) in seconds.
    pub timeout_secs: u64,

    /// User agent string.
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.okx.com".to_string(),
            api_prefix: "/api/v5".to_string(),
            timeout_secs: 30,
            user_agent: "wallet-api-client/0.1.0".to_string(),
        }
    }
}

/// Parameters of the total-value-by-address query.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AssetQueryConfig {
    /// Comma-separated chain indexes to include.
    pub chains: String,

    /// Asset type filter ("0" = all assets).
    pub asset_type: String,

    /// Filter out airdropped risk tokens.
    pub exclude_risk_token: bool,

    /// Line-delimited address list.
    pub addresses_path: String,

    /// Output JSON document, overwritten on each run.
    pub results_path: String,
}

impl Default for AssetQueryConfig {
    fn default() -> Self {
        Self {
            chains: "1".to_string(),
            asset_type: "0".to_string(),
            exclude_risk_token: true,
            addresses_path: "addresses.txt".to_string(),
            results_path: "results.json".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON log lines instead of the human-readable format.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}
