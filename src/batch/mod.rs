//! Batch asset query subsystem.
//!
//! # Data Flow
//! ```text
//! addresses.txt (one address per line)
//!     → addresses.rs (trim, drop blanks)
//!     → query.rs (one total-value call per address, in order)
//!         Success  → AddressQueryRecord appended
//!         Failure  → AddressFailure noted, continue
//!     → store.rs (single atomic write of all successes)
//!     → results.json
//! ```
//!
//! # Design Decisions
//! - Fail-soft: one bad address never stops the batch
//! - Sequential; no concurrent requests against the service
//! - Output order = input order restricted to successes

pub mod addresses;
pub mod query;
pub mod store;

pub use addresses::{load_addresses, parse_addresses};
pub use query::{AddressFailure, AssetQueryOptions, BatchAssetQuery, BatchReport};
pub use store::{read_results, write_results, AddressQueryRecord};

use std::path::PathBuf;

use thiserror::Error;

/// Errors at the file boundaries of a batch run.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("failed to read address list {path}: {source}")]
    ReadAddresses {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read results from {path}: {source}")]
    ReadResults {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write results to {path}: {source}")]
    WriteResults {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("results JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
