//! Configuration validation.
//!
//! Serde handles syntax; this pass checks values. All problems are
//! collected so a broken file is reported in one go.

use alloy::primitives::Address;
use thiserror::Error;

use crate::config::schema::MonitorConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("network.rpc_url is empty")]
    EmptyRpcUrl,

    #[error("network.rpc_url '{url}' is not a valid URL: {reason}")]
    InvalidRpcUrl { url: String, reason: String },

    #[error("network.rpc_url '{url}' uses unsupported scheme '{scheme}' (expected http or https)")]
    UnsupportedScheme { url: String, scheme: String },

    #[error("network.chain_id must be non-zero")]
    ZeroChainId,

    #[error("contracts.{field} '{value}' is not a valid address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("update_intervals.{0} must be non-zero")]
    ZeroInterval(&'static str),
}

/// Check a parsed configuration, returning every problem found.
pub fn validate_config(config: &MonitorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let url = config.network.rpc_url.trim();
    if url.is_empty() {
        errors.push(ValidationError::EmptyRpcUrl);
    } else {
        match url::Url::parse(url) {
            Ok(parsed) if !matches!(parsed.scheme(), "http" | "https") => {
                errors.push(ValidationError::UnsupportedScheme {
                    url: url.to_string(),
                    scheme: parsed.scheme().to_string(),
                });
            }
            Ok(_) => {}
            Err(e) => errors.push(ValidationError::InvalidRpcUrl {
                url: url.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    if config.network.chain_id == 0 {
        errors.push(ValidationError::ZeroChainId);
    }

    let addresses = [
        ("identity_registry", &config.contracts.identity_registry),
        ("jobs_module", &config.contracts.jobs_module),
        ("hypt_token", &config.contracts.hypt_token),
    ];
    for (field, value) in addresses {
        if value.trim().parse::<Address>().is_err() {
            errors.push(ValidationError::InvalidAddress {
                field,
                value: value.clone(),
            });
        }
    }

    let intervals = [
        ("dashboard_ms", config.update_intervals.dashboard_ms),
        ("agents_ms", config.update_intervals.agents_ms),
        ("jobs_ms", config.update_intervals.jobs_ms),
    ];
    for (field, value) in intervals {
        if value == 0 {
            errors.push(ValidationError::ZeroInterval(field));
        }
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
    fn test_default_config_is_valid() {
        assert!(validate_config(&MonitorConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = MonitorConfig::default();
        config.network.rpc_url = "not a url".to_string();
        config.network.chain_id = 0;
        config.contracts.jobs_module = "0x1234".to_string();
        config.update_intervals.agents_ms = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::ZeroChainId));
        assert!(errors.contains(&ValidationError::ZeroInterval("agents_ms")));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::InvalidAddress { field: "jobs_module", .. })));
    }

    #[test]
    fn test_empty_url() {
        let mut config = MonitorConfig::default();
        config.network.rpc_url = "  ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::EmptyRpcUrl]);
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        let mut config = MonitorConfig::default();
        config.network.rpc_url = "wss://testnet.hashio.io/ws".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::UnsupportedScheme {
                url: "wss://testnet.hashio.io/ws".to_string(),
                scheme: "wss".to_string(),
            }]
        );

        config.network.rpc_url = "https://testnet.hashio.io/api".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_padded_address_accepted() {
        let mut config = MonitorConfig::default();
        config.contracts.hypt_token = format!("  {}\n", config.contracts.hypt_token);
        assert!(validate_config(&config).is_ok());
    }
}
