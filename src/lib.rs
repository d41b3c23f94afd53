//! Authenticated client for an exchange wallet API.

pub mod auth;
pub mod batch;
pub mod client;
pub mod config;
pub mod observability;
pub mod pipeline;

pub use batch::{BatchAssetQuery, BatchReport};
pub use client::{ApiClient, ApiResult, ExchangeApi};
pub use config::{AppConfig, Credentials};
pub use pipeline::{TransactionParams, TransactionPipeline};
