//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{DeviceOverrides, TriggerConfig};
use crate::config::validation::{validate_config, ValidationErrors};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),
}

/// Load a TOML file, apply command-line overrides, then validate.
pub fn load_config_with(
    path: &Path,
    overrides: &DeviceOverrides,
) -> Result<TriggerConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let mut config: TriggerConfig = toml::from_str(&content)?;
    overrides.apply(&mut config);
    validate_config(&config)?;
    Ok(config)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<TriggerConfig, ConfigError> {
    let config: TriggerConfig = toml::from_str(content)?;
    validate_config(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[device]\nhost = \"target-ab12.local\"\nport = 8080").unwrap();

        let config = load_config_with(file.path(), &DeviceOverrides::default()).unwrap();
        assert_eq!(config.device.host, "target-ab12.local");
        assert_eq!(config.device.port, 8080);
    }

    #[test]
    fn test_overrides_apply_before_validation() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[device]\nhost = \"file.local\"\nport = 0").unwrap();

        assert!(matches!(
            load_config_with(file.path(), &DeviceOverrides::default()),
            Err(ConfigError::Validation(_))
        ));

        let overrides = DeviceOverrides {
            host: Some("cli.local".into()),
            port: Some(8080),
        };
        let config = load_config_with(file.path(), &overrides).unwrap();
        assert_eq!(config.device.host, "cli.local");
        assert_eq!(config.device.port, 8080);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config_with(
            Path::new("/nonexistent/target-trigger.toml"),
            &DeviceOverrides::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_syntax_error_is_parse_error() {
        let err = parse_config("[device\nhost = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_semantic_error_is_validation_error() {
        let err = parse_config("[controller]\ndwell_ms = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("dwell_ms"));
    }
}
