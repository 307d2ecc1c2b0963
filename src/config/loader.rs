//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use super::schema::GatewayConfig;
use super::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<GatewayConfig, ConfigError> {
    let config: GatewayConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_parses_with_defaults() {
        let config = parse_config("").unwrap();
        assert!(config.server.actions.is_empty());
        assert!(config.host_servers.is_empty());
    }

    #[test]
    fn full_config_round_trips_through_toml() {
        let config = parse_config(
            r#"
            [server]
            access_control_allow_origin = "https://app.example.com"

            [[server.rewrites]]
            from = "/old/*"
            to = "/new"

            [[server.actions]]
            name = "user"
            url = "/u/{id}"
            method = "GET"
            type = "fetch"

            [[host_servers]]
            hosts = "api.example.com"

            [[host_servers.modules]]
            name = "health"
            url = "/health"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.rewrites[0].from, "/old/*");
        assert_eq!(config.server.actions[0].kind, "fetch");
        assert_eq!(config.host_servers[0].modules[0].name, "health");
    }

    #[test]
    fn invalid_config_reports_validation_errors() {
        let err = parse_config(
            r#"
            [[server.actions]]
            name = "broken"
            type = "fetch"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }
}
