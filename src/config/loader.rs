//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};
use crate::observability::Severity;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    tracing::debug!(path = %path.display(), "Configuration file loaded");
    Ok(config)
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub log_level: Option<Severity>,
    pub production: bool,
    pub bind_address: Option<String>,
}

/// Apply `overrides` and validate the result again.
pub fn apply_overrides(
    mut config: AppConfig,
    overrides: ConfigOverrides,
) -> Result<AppConfig, ConfigError> {
    if let Some(level) = overrides.log_level {
        config.logger.log_level = Some(level);
    }
    if overrides.production {
        config.logger.production = Some(true);
    }
    if let Some(bind) = overrides.bind_address {
        config.server.bind_address = bind;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}
