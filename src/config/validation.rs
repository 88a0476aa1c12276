//! Configuration validation.
//!
//! Semantic validation on top of serde's syntactic checks. Returns all
//! violations, not just the first; runs before a config is accepted.

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ClientConfig;

/// A single validation violation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("duplicate service name `{0}`")]
    DuplicateService(String),

    #[error("service `{0}` has no endpoints")]
    EmptyService(String),

    #[error("service `{service}` endpoint `{endpoint}` is not a socket address")]
    BadEndpoint { service: String, endpoint: String },

    #[error("retry.max_attempts must be at least 1")]
    ZeroAttempts,

    #[error("retry.base_delay_ms ({base}) exceeds retry.max_delay_ms ({max})")]
    DelayRange { base: u64, max: u64 },
}

/// Validate a configuration, collecting every violation.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut names = HashSet::new();

    for service in &config.services {
        if !names.insert(service.name.as_str()) {
            errors.push(ValidationError::DuplicateService(service.name.clone()));
        }
        if service.endpoints.is_empty() {
            errors.push(ValidationError::EmptyService(service.name.clone()));
        }
        for endpoint in &service.endpoints {
            if endpoint.parse::<SocketAddr>().is_err() {
                errors.push(ValidationError::BadEndpoint {
                    service: service.name.clone(),
                    endpoint: endpoint.clone(),
                });
            }
        }
    }

    if config.retry.max_attempts == 0 {
        errors.push(ValidationError::ZeroAttempts);
    }
    if config.retry.base_delay_ms > config.retry.max_delay_ms {
        errors.push(ValidationError::DelayRange {
            base: config.retry.base_delay_ms,
            max: config.retry.max_delay_ms,
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
