//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (stage progress, per-address outcomes, request failures)
//!     → spans with a run_id per pipeline / batch run
//!
//! Consumers:
//!     → logging.rs subscriber (stderr, text or JSON)
//! ```
//!
//! # Design Decisions
//! - Structured fields (`stage`, `address`, `error`) instead of formatted strings
//! - Secrets never appear in events

pub mod logging;

pub use logging::init_logging;
