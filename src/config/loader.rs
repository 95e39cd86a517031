//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: AppConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_toml_fills_defaults() {
        let config: AppConfig = toml::from_str("").expect("parse");
        assert_eq!(config.dispatch.base_path, "/api");
        assert_eq!(config.pagination.default_limit, 20);
    }

    #[test]
    fn sections_override_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [dispatch]
            api_accept = "application/vnd.acme+json"
            base_path = "/v2"

            [pagination]
            default_limit = 10
            max_limit = 50
            "#,
        )
        .expect("parse");
        assert_eq!(config.dispatch.api_accept, "application/vnd.acme+json");
        assert_eq!(config.dispatch.base_path, "/v2");
        assert_eq!(config.pagination.max_limit, 50);
        // Untouched sections keep defaults.
        assert_eq!(config.timeouts.request_secs, 30);
    }
}
