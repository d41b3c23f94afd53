//! Wallet API client CLI.
//!
//! # Architecture Overview
//!
//! ```text
//!   prepare-tx                                query-assets
//!   ──────────                                ────────────
//!   params.toml                               addresses.txt
//!       │                                          │
//!       ▼                                          ▼
//!   TransactionPipeline (fail-fast)          BatchAssetQuery (fail-soft)
//!       │  sign-info → gas-price →                 │  one call per address
//!       │  gas-limit → nonce → broadcast           │
//!       └──────────────┬───────────────────────────┘
//!                      ▼
//!                  ApiClient ──▶ RequestBuilder ──▶ Signer
//!                      │
//!                      ▼
//!              wallet API (HTTPS, JSON)
//!                      │
//!       ┌──────────────┴───────────────┐
//!       ▼                              ▼
//!   stage results (stdout)        results.json
//! ```
//!
//! Credentials come from the environment (`OK_ACCESS_KEY`, `OK_ACCESS_SECRET`,
//! `OK_ACCESS_PASSPHRASE`, optional `OK_ACCESS_PROJECT`).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use wallet_api_client::batch::{load_addresses, AssetQueryOptions, BatchAssetQuery};
use wallet_api_client::config::{load_config_or_default, Credentials};
use wallet_api_client::observability::init_logging;
use wallet_api_client::pipeline::{TransactionParams, TransactionPipeline};
use wallet_api_client::ApiClient;

#[derive(Parser)]
#[command(name = "wallet-api-client")]
#[command(about = "Signed client for the exchange wallet API", long_about = None)]
struct Cli {
    /// TOML configuration file (defaults are used when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run sign-info, gas price, gas limit, nonce and broadcast in order
    PrepareTx {
        /// TOML file with the transaction parameters
        #[arg(short, long)]
        params: PathBuf,
    },
    /// Query the total asset value of every address in a list
    QueryAssets {
        /// Address list, one per line (overrides asset_query.addresses_path)
        #[arg(short, long)]
        addresses: Option<PathBuf>,

        /// Results file (overrides asset_query.results_path)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config_or_default(cli.config.as_deref())?;
    init_logging(&config.observability);

    tracing::info!(
        base_url = %config.api.base_url,
        api_prefix = %config.api.api_prefix,
        timeout_secs = config.api.timeout_secs,
        "Configuration loaded"
    );

    let credentials = Credentials::from_env().inspect_err(|e| {
        tracing::error!(error = %e, "Credentials not configured");
    })?;
    let client = ApiClient::new(&config.api, credentials)?;

    match cli.command {
        Commands::PrepareTx { params } => {
            let params = TransactionParams::load(&params)?;
            let mut pipeline = TransactionPipeline::new(&client);
            let context = pipeline.run(&params).await?;
            println!("{}", serde_json::to_string_pretty(&context)?);
        }
        Commands::QueryAssets { addresses, output } => {
            let addresses_path =
                addresses.unwrap_or_else(|| PathBuf::from(&config.asset_query.addresses_path));
            let results_path =
                output.unwrap_or_else(|| PathBuf::from(&config.asset_query.results_path));

            let addresses = load_addresses(&addresses_path)?;
            let query = BatchAssetQuery::new(&client, AssetQueryOptions::from(&config.asset_query));
            let report = query.run_and_persist(&addresses, &results_path).await?;

            for failure in &report.failures {
                eprintln!("{}: {}", failure.address, failure.failure);
            }
            println!(
                "{} succeeded, {} failed; results saved to {}",
                report.records.len(),
                report.failures.len(),
                results_path.display()
            );
        }
    }

    Ok(())
}
