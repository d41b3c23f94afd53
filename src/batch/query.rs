//! Per-address total value lookups.
//!
//! # Responsibilities
//! - Query each address once, in input order, one request at a time
//! - Downgrade any failure to a per-address note and keep going
//! - Hand the accumulated successes to the result store

use std::collections::HashSet;
use std::path::Path;

use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use crate::batch::store::{write_results, AddressQueryRecord};
use crate::batch::BatchError;
use crate::client::endpoints::{with_query, TOTAL_VALUE_BY_ADDRESS};
use crate::client::types::application_code;
use crate::client::{ApiFailure, ExchangeApi, FailureKind};
use crate::config::AssetQueryConfig;

/// Query parameters shared by every address in a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetQueryOptions {
    /// Comma-separated chain indexes.
    pub chains: String,
    /// "0" = all assets.
    pub asset_type: String,
    pub exclude_risk_token: bool,
}

impl Default for AssetQueryOptions {
    fn default() -> Self {
        Self::from(&AssetQueryConfig::default())
    }
}

impl From<&AssetQueryConfig> for AssetQueryOptions {
    fn from(config: &AssetQueryConfig) -> Self {
        Self {
            chains: config.chains.clone(),
            asset_type: config.asset_type.clone(),
            exclude_risk_token: config.exclude_risk_token,
        }
    }
}

/// Error note for one address.
#[derive(Debug, Clone, PartialEq)]
pub struct AddressFailure {
    pub address: String,
    pub failure: ApiFailure,
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    /// Successes, in input order.
    pub records: Vec<AddressQueryRecord>,
    /// Failures, in input order.
    pub failures: Vec<AddressFailure>,
    /// Repeated addresses that were not queried again.
    pub duplicates: usize,
}

/// Fail-soft batch of total-value-by-address queries.
pub struct BatchAssetQuery<'a, A: ExchangeApi + ?Sized> {
    api: &'a A,
    options: AssetQueryOptions,
}

impl<'a, A: ExchangeApi + ?Sized> BatchAssetQuery<'a, A> {
    pub fn new(api: &'a A, options: AssetQueryOptions) -> Self {
        Self { api, options }
    }

    /// Endpoint (with query string) for one address.
    pub fn endpoint_for(&self, address: &str) -> String {
        with_query(
            TOTAL_VALUE_BY_ADDRESS,
            &[
                ("address", address),
                ("chains", self.options.chains.as_str()),
                ("assetType", self.options.asset_type.as_str()),
                (
                    "excludeRiskToken",
                    if self.options.exclude_risk_token { "true" } else { "false" },
                ),
            ],
        )
    }

    /// Query every address in order. Never fails as a whole.
    pub async fn run(&self, addresses: &[String]) -> BatchReport {
        let span = tracing::info_span!("asset_batch", run_id = %Uuid::new_v4(), total = addresses.len());
        self.query_all(addresses).instrument(span).await
    }

    /// Query every address, then write the successes to `results_path`.
    ///
    /// The file is written once, after the last address, even if every query failed.
    pub async fn run_and_persist(
        &self,
        addresses: &[String],
        results_path: &Path,
    ) -> Result<BatchReport, BatchError> {
        let report = self.run(addresses).await;
        write_results(results_path, &report.records)?;
        Ok(report)
    }

    async fn query_all(&self, addresses: &[String]) -> BatchReport {
        let mut report = BatchReport::default();
        let mut seen = HashSet::new();

        for address in addresses {
            if !seen.insert(address.as_str()) {
                tracing::debug!(address = %address, "Skipping duplicate address");
                report.duplicates += 1;
                continue;
            }

            tracing::info!(address = %address, "Querying address");
            match self.query_one(address).await {
                Ok(record) => {
                    tracing::debug!(address = %address, total_value = %record.total_value, "Address queried");
                    report.records.push(record);
                }
                Err(failure) => {
                    tracing::warn!(address = %address, error = %failure, "Address query failed");
                    report.failures.push(AddressFailure {
                        address: address.clone(),
                        failure,
                    });
                }
            }
        }

        tracing::info!(
            succeeded = report.records.len(),
            failed = report.failures.len(),
            "Batch finished"
        );
        report
    }

    async fn query_one(&self, address: &str) -> Result<AddressQueryRecord, ApiFailure> {
        let endpoint = self.endpoint_for(address);
        let payload = self
            .api
            .call(reqwest::Method::GET, &endpoint, None)
            .await
            .into_result()?;

        if application_code(&payload).as_deref() != Some("0") {
            return Err(ApiFailure::new(
                FailureKind::Parse,
                "response carries no success code",
                Some(payload.to_string()),
            ));
        }

        let total_value = total_value(&payload).ok_or_else(|| {
            ApiFailure::new(
                FailureKind::Parse,
                "response has no data[0].totalValue",
                Some(payload.to_string()),
            )
        })?;

        Ok(AddressQueryRecord {
            address: address.to_string(),
            total_value,
        })
    }
}

/// `data[0].totalValue`, as a string whether the service sent a string or a number.
fn total_value(payload: &Value) -> Option<String> {
    match payload.get("data")?.get(0)?.get("totalValue")? {
        Value::String(value) => Some(value.clone()),
        Value::Number(value) => Some(value.to_string()),
        _ => None,
    }
}
