//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject configurations that would otherwise fail at request time:
//!   empty pools, unparseable base URLs, a zero attempt budget
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before the config is accepted into the system

use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic problem found in the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("pool.instances must contain at least one URL")]
    EmptyPool,

    #[error("invalid pool instance URL '{url}': {reason}")]
    InvalidInstance { url: String, reason: String },

    #[error("duplicate pool instance URL '{0}'")]
    DuplicateInstance(String),

    #[error("failover.max_attempts must be at least 1")]
    ZeroAttempts,

    #[error("invalid {service} origin '{url}': {reason}")]
    InvalidOrigin {
        service: &'static str,
        url: String,
        reason: String,
    },

    #[error("invalid listener.bind_address '{0}'")]
    InvalidBindAddress(String),
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.pool.instances.is_empty() {
        errors.push(ValidationError::EmptyPool);
    }

    let mut seen = Vec::new();
    for raw in &config.pool.instances {
        let normalized = raw.trim_end_matches('/');
        if let Err(e) = Url::parse(normalized) {
            errors.push(ValidationError::InvalidInstance {
                url: raw.clone(),
                reason: e.to_string(),
            });
        } else if seen.contains(&normalized) {
            errors.push(ValidationError::DuplicateInstance(raw.clone()));
        } else {
            seen.push(normalized);
        }
    }

    if config.failover.max_attempts == 0 {
        errors.push(ValidationError::ZeroAttempts);
    }

    for (service, url) in [
        ("deezer", &config.upstreams.deezer),
        ("lrclib", &config.upstreams.lrclib),
    ] {
        if let Err(e) = Url::parse(url) {
            errors.push(ValidationError::InvalidOrigin {
                service,
                url: url.clone(),
                reason: e.to_string(),
            });
        }
    }

    if config.listener.bind_address.parse::<std::net::SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
