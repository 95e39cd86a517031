//! Configuration validation.
//!
//! Semantic checks on top of serde's syntactic layer. All violations are
//! collected and returned together rather than failing on the first.

use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::AppConfig;

/// One semantic violation, pointing at the offending field.
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

/// Validate a parsed configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("not a socket address: {}", config.listener.bind_address),
        ));
    }
    if config.listener.max_body_bytes == 0 {
        errors.push(ValidationError::new(
            "listener.max_body_bytes",
            "must be greater than zero",
        ));
    }

    if config.dispatch.api_accept.is_empty() {
        errors.push(ValidationError::new(
            "dispatch.api_accept",
            "guard value must not be empty",
        ));
    }
    if !config.dispatch.base_path.is_empty() && !config.dispatch.base_path.starts_with('/') {
        errors.push(ValidationError::new(
            "dispatch.base_path",
            "must start with '/' or be empty",
        ));
    }
    if config.dispatch.base_path.ends_with('/') {
        errors.push(ValidationError::new(
            "dispatch.base_path",
            "must not end with '/'",
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new(
            "timeouts.request_secs",
            "must be greater than zero",
        ));
    }

    if config.pagination.default_limit == 0 {
        errors.push(ValidationError::new(
            "pagination.default_limit",
            "must be greater than zero",
        ));
    }
    if config.pagination.max_limit < config.pagination.default_limit {
        errors.push(ValidationError::new(
            "pagination.max_limit",
            "must be at least pagination.default_limit",
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!(
                "not a socket address: {}",
                config.observability.metrics_address
            ),
        ));
    }

    if config.audit.recent_capacity == 0 {
        errors.push(ValidationError::new(
            "audit.recent_capacity",
            "must be greater than zero",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&AppConfig::default()).is_ok());
    }

    #[test]
    fn all_errors_are_collected() {
        let mut config = AppConfig::default();
        config.listener.bind_address = "nonsense".into();
        config.dispatch.api_accept = String::new();
        config.pagination.default_limit = 0;

        let errors = validate_config(&config).expect_err("invalid");
        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert!(fields.contains(&"listener.bind_address"));
        assert!(fields.contains(&"dispatch.api_accept"));
        assert!(fields.contains(&"pagination.default_limit"));
    }

    #[test]
    fn base_path_shape_is_checked() {
        let mut config = AppConfig::default();
        config.dispatch.base_path = "api".into();
        assert!(validate_config(&config).is_err());

        config.dispatch.base_path = "/api/".into();
        assert!(validate_config(&config).is_err());

        config.dispatch.base_path = String::new();
        assert!(validate_config(&config).is_ok());
    }
}
