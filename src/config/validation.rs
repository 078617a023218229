//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (dwell > 0, port non-zero)
//! - Check candidate paths can be joined onto the device base URL
//! - Check listener addresses parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: TriggerConfig → Result<(), ValidationErrors>
//! - Runs before config is accepted into the system

use std::fmt;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::TriggerConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("device.host must not be empty")]
    EmptyHost,

    #[error("device.port must be non-zero")]
    ZeroPort,

    #[error("device base URL is invalid: {0}")]
    InvalidBaseUrl(String),

    #[error("probe.candidates[{index}] path '{path}' must start with '/'")]
    RelativeCandidatePath { index: usize, path: String },

    #[error("probe.candidate_timeout_ms must be greater than zero when set")]
    ZeroCandidateTimeout,

    #[error("controller.dwell_ms must be greater than zero")]
    ZeroDwell,

    #[error("{field} '{value}' is not a valid socket address")]
    InvalidAddress { field: &'static str, value: String },
}

/// Every problem found in one validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validate a parsed configuration.
pub fn validate_config(config: &TriggerConfig) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();

    if config.device.host.trim().is_empty() {
        errors.push(ValidationError::EmptyHost);
    } else if let Err(e) = config.device.base_url() {
        errors.push(ValidationError::InvalidBaseUrl(e.to_string()));
    }
    if config.device.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }

    for (index, candidate) in config.probe.candidates.iter().enumerate() {
        if !candidate.path.starts_with('/') {
            errors.push(ValidationError::RelativeCandidatePath {
                index,
                path: candidate.path.clone(),
            });
        }
    }

    if config.probe.candidate_timeout_ms == Some(0) {
        errors.push(ValidationError::ZeroCandidateTimeout);
    }

    if config.controller.dwell_ms == 0 {
        errors.push(ValidationError::ZeroDwell);
    }

    if config.panel.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "panel.bind_address",
            value: config.panel.bind_address.clone(),
        });
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::candidate::CandidateEndpoint;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&TriggerConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = TriggerConfig::default();
        config.device.host = "  ".into();
        config.device.port = 0;
        config.controller.dwell_ms = 0;
        config.probe.candidate_timeout_ms = Some(0);
        config.probe.candidates = vec![
            CandidateEndpoint::post("/ok"),
            CandidateEndpoint::get("switch/no_slash"),
        ];

        let errors = validate_config(&config).unwrap_err().0;
        assert_eq!(errors.len(), 5);
        assert!(errors.contains(&ValidationError::EmptyHost));
        assert!(errors.contains(&ValidationError::ZeroPort));
        assert!(errors.contains(&ValidationError::ZeroDwell));
        assert!(errors.contains(&ValidationError::ZeroCandidateTimeout));
        assert!(errors.contains(&ValidationError::RelativeCandidatePath {
            index: 1,
            path: "switch/no_slash".into(),
        }));
    }

    #[test]
    fn test_metrics_address_only_checked_when_enabled() {
        let mut config = TriggerConfig::default();
        config.observability.metrics_address = "not-an-address".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        let errors = validate_config(&config).unwrap_err().0;
        assert!(matches!(
            errors[0],
            ValidationError::InvalidAddress { field: "observability.metrics_address", .. }
        ));
    }
}
