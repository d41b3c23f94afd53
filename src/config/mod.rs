//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!
//! process environment
//!     → credentials.rs
//!     → Credentials (passed by value into the API client)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Credentials never come from the config file

pub mod credentials;
pub mod loader;
pub mod schema;
pub mod validation;

pub use credentials::Credentials;
pub use loader::{load_config, load_config_or_default, ConfigError};
pub use schema::{ApiConfig, AppConfig, AssetQueryConfig, ObservabilityConfig};
pub use validation::ValidationError;
