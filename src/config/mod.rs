//! Configuration management.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → CtxlogConfig (validated, immutable)
//!     → observability::logging::init
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse, ConfigError};
pub use schema::{CtxlogConfig, LogFormat, LoggingConfig};
pub use validation::{validate_config, ValidationError};
