//! Wallet API client subsystem.
//!
//! # Data Flow
//! ```text
//! (method, endpoint, body?)
//!     → api.rs (prefix path, serialize body once)
//!     → auth::RequestBuilder (timestamp + signature headers)
//!     → reqwest (single attempt, configured timeout)
//!     → types.rs (HTTP status → JSON → application code)
//!     → ApiResult::Success(payload) | ApiResult::Failure(ApiFailure)
//! ```
//!
//! # Design Decisions
//! - No fault escapes `call`; transport, HTTP, parse and application errors are values
//! - No retries here; callers own retry policy
//! - Pipelines depend on the `ExchangeApi` trait, not on `ApiClient`

pub mod api;
pub mod endpoints;
pub mod types;

pub use api::{ApiClient, ExchangeApi};
pub use types::{ApiFailure, ApiResult, ClientError, FailureKind};
