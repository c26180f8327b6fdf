//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Errors producing a usable configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: GatewayConfig = toml::from_str(&content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_io_error() {
        let err = load_config(Path::new("/nonexistent/gateway.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn invalid_file_lists_every_validation_error() {
        let path = std::env::temp_dir().join("algoforge-loader-test.toml");
        fs::write(&path, "[algod]\nwait_rounds = 0\n").unwrap();
        let err = load_config(&path).unwrap_err();
        fs::remove_file(&path).ok();

        let rendered = err.to_string();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(rendered.contains("contract.app_id"));
        assert!(rendered.contains("algod.wait_rounds"));
    }

    #[test]
    fn unparseable_toml_is_a_parse_error() {
        let path = std::env::temp_dir().join("algoforge-loader-garbage.toml");
        fs::write(&path, "this is not toml [").unwrap();
        let err = load_config(&path).unwrap_err();
        fs::remove_file(&path).ok();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
