//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reserved keys must be non-empty and distinct
//! - Value ranges (poll interval > 0, parsable metrics address)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: StoreConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::StoreConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

pub fn validate_config(config: &StoreConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let containers = &config.containers;

    if containers.root.trim().is_empty() {
        errors.push(ValidationError::new("containers.root", "must not be empty"));
    }
    if containers.names_key.is_empty() {
        errors.push(ValidationError::new("containers.names_key", "must not be empty"));
    }
    if containers.parent_key.is_empty() {
        errors.push(ValidationError::new("containers.parent_key", "must not be empty"));
    }
    if !containers.names_key.is_empty() && containers.names_key == containers.parent_key {
        errors.push(ValidationError::new(
            "containers.parent_key",
            format!("must differ from names_key ('{}')", containers.names_key),
        ));
    }
    if containers.truthy_tokens.iter().all(|t| t.trim().is_empty()) {
        errors.push(ValidationError::new(
            "containers.truthy_tokens",
            "must contain at least one non-empty token",
        ));
    }

    if config.source.poll_interval_secs == 0 {
        errors.push(ValidationError::new("source.poll_interval_secs", "must be greater than 0"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
