//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::MonitorConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<MonitorConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<MonitorConfig, ConfigError> {
    let config: MonitorConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Replace the RPC endpoint of an already loaded config and re-validate.
pub fn override_rpc_url(
    mut config: MonitorConfig,
    rpc_url: String,
) -> Result<MonitorConfig, ConfigError> {
    config.network.rpc_url = rpc_url;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[network]
name = "Local Anvil"
chain_id = 31337
rpc_url = "http://127.0.0.1:8545"

[update_intervals]
dashboard_ms = 5000

[session]
probe_timeout_secs = 3
"#
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.network.name, "Local Anvil");
        assert_eq!(config.update_intervals.dashboard_ms, 5000);
        assert_eq!(config.update_intervals.jobs_ms, 15_000);
        assert_eq!(config.session.probe_timeout_secs, Some(3));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/hypt-monitor.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_parse_error() {
        let err = parse_config("[network\nchain_id = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_error_lists_every_problem() {
        let err = parse_config(
            r#"
[network]
chain_id = 0

[contracts]
hypt_token = "nope"
"#,
        )
        .unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Validation failed: "));
        assert!(message.contains("chain_id"));
        assert!(message.contains("hypt_token"));
    }

    #[test]
    fn test_rpc_url_override_is_validated() {
        let config = override_rpc_url(
            MonitorConfig::default(),
            "http://127.0.0.1:8545".to_string(),
        )
        .unwrap();
        assert_eq!(config.network.rpc_url, "http://127.0.0.1:8545");

        let err = override_rpc_url(MonitorConfig::default(), "ftp://example.org".to_string())
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Validation(ref errors)
                if matches!(errors.as_slice(), [ValidationError::UnsupportedScheme { .. }])
        ));
    }
}
