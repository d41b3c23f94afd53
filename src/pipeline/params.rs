//! Caller-supplied transaction parameters.
//!
//! Request bodies serialize with the wire field names (`chainIndex`,
//! `fromAddr`, ...). A parameter file is TOML:
//!
//! ```toml
//! chain_index = "1"
//! address = "0xdf54..."
//!
//! [sign_info]
//! chainIndex = "1"
//! fromAddr = "0xdf54..."
//! toAddr = "0x1e80..."
//! txAmount = "123000000000000"
//! extJson = { inputData = "041bbc..." }
//!
//! [gas_limit]
//! # same shape as sign_info
//!
//! [broadcast]
//! accountId = "5f45a951-..."
//! chainIndex = "1"
//! address = "0x2381..."
//! signedTx = "0x02f8..."
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Extra chain-specific transaction data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtJson {
    /// Contract call data.
    pub input_data: String,
}

/// Unsigned transfer description, body of sign-info and gas-limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxDraft {
    pub chain_index: String,
    pub from_addr: String,
    pub to_addr: String,
    /// Amount in the chain's smallest unit.
    pub tx_amount: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ext_json: Option<ExtJson>,
}

/// Body of broadcast-transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastRequest {
    pub account_id: String,
    pub chain_index: String,
    pub address: String,
    /// Hex-encoded signed transaction.
    pub signed_tx: String,
}

/// Everything one pipeline run needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionParams {
    /// Chain index for the gas-price and nonce queries.
    pub chain_index: String,
    /// Address whose nonce is fetched.
    pub address: String,
    pub sign_info: TxDraft,
    pub gas_limit: TxDraft,
    pub broadcast: BroadcastRequest,
}

/// Errors loading a parameter file.
#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("failed to read parameters: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse parameters: {0}")]
    Parse(#[from] toml::de::Error),
}

impl TransactionParams {
    /// Load parameters from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ParamsError> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}
