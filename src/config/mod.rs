//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated)
//!     → CLI flags override (validated again)
//!     → the composition root builds the logger
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{apply_overrides, load_config, parse_config, ConfigError, ConfigOverrides};
pub use schema::{AccessLogConfig, AppConfig, LoggerConfig, ServerConfig};
pub use validation::{validate_config, ValidationError};
