//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that identifiers the adapters depend on are actually set
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::GatewayConfig;

/// A single semantic validation failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field}: invalid bind address '{value}'")]
    BindAddress { field: &'static str, value: String },

    #[error("{field}: invalid URL '{value}'")]
    Url { field: &'static str, value: String },

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    #[error("{field} must be set")]
    Unset { field: &'static str },
}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }
    if config.listener.request_timeout_secs == 0 {
        errors.push(ValidationError::Zero {
            field: "listener.request_timeout_secs",
        });
    }

    if url::Url::parse(&config.algod.url).is_err() {
        errors.push(ValidationError::Url {
            field: "algod.url",
            value: config.algod.url.clone(),
        });
    }
    if config.algod.timeout_secs == 0 {
        errors.push(ValidationError::Zero {
            field: "algod.timeout_secs",
        });
    }
    if config.algod.wait_rounds == 0 {
        errors.push(ValidationError::Zero {
            field: "algod.wait_rounds",
        });
    }

    if config.contract.app_id == 0 {
        errors.push(ValidationError::Unset {
            field: "contract.app_id",
        });
    }

    if url::Url::parse(&config.scanner.upstream_url).is_err() {
        errors.push(ValidationError::Url {
            field: "scanner.upstream_url",
            value: config.scanner.upstream_url.clone(),
        });
    }
    if config.scanner.chain.trim().is_empty() {
        errors.push(ValidationError::Unset {
            field: "scanner.chain",
        });
    }
    if config.scanner.timeout_secs == 0 {
        errors.push(ValidationError::Zero {
            field: "scanner.timeout_secs",
        });
    }

    if config.signer.key_env.trim().is_empty() {
        errors.push(ValidationError::Unset {
            field: "signer.key_env",
        });
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::BindAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
