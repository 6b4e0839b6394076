//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::AppConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("server.bind_address `{0}` is not a socket address")]
    BindAddress(String),

    #[error("server.request_timeout_secs must be greater than 0")]
    ZeroTimeout,

    #[error("access_log.component must not be empty")]
    EmptyComponent,
}

pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.server.bind_address.clone(),
        ));
    }

    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if matches!(config.access_log.component.as_deref(), Some(name) if name.trim().is_empty()) {
        errors.push(ValidationError::EmptyComponent);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
