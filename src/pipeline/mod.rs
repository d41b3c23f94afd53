//! Transaction preparation subsystem.
//!
//! # Data Flow
//! ```text
//! TransactionParams (TOML file)
//!     → transaction.rs (stage → StageRequest)
//!     → ExchangeApi::call
//!     → Success: PipelineContext.record, next stage
//!     → Failure: PipelineError { stage, failure }, stop
//! ```
//!
//! # Design Decisions
//! - Fail-fast: the first failed stage ends the run
//! - Strictly sequential; one call in flight at a time
//! - No rollback of completed stages

pub mod params;
pub mod transaction;

pub use params::{BroadcastRequest, ExtJson, ParamsError, TransactionParams, TxDraft};
pub use transaction::{
    PipelineContext, PipelineError, PipelineState, Stage, StageRequest, TransactionPipeline,
};
