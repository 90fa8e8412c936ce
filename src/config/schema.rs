//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the monitor.
//! All types derive Serde traits for deserialization from config files, and
//! every field has a default pointing at the Hedera testnet deployment.

use serde::{Deserialize, Serialize};

/// Root configuration for the monitor.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MonitorConfig {
    /// Network endpoint and identity.
    pub network: NetworkConfig,

    /// Deployed contract addresses.
    pub contracts: ContractsConfig,

    /// Refresh cadence for downstream displays.
    pub update_intervals: UpdateIntervals,

    /// Session behaviour (probe timeout, chain verification).
    pub session: SessionConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Network configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Human-readable network name, for logs only.
    pub name: String,

    /// Expected chain ID (296 for Hedera testnet).
    pub chain_id: u64,

    /// JSON-RPC endpoint URL.
    pub rpc_url: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            name: "Hedera Testnet".to_string(),
            chain_id: 296,
            rpc_url: "https://testnet.hashio.io/api".to_string(),
        }
    }
}

/// Addresses of the three contracts the session binds.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContractsConfig {
    /// IdentityRegistry (agent NFTs).
    pub identity_registry: String,

    /// JobsModule (job escrow).
    pub jobs_module: String,

    /// HyptToken (ERC-20).
    pub hypt_token: String,
}

impl Default for ContractsConfig {
    fn default() -> Self {
        Self {
            identity_registry: "0x5e3946F4f1c94D7a7d8Ac70Ea8860deD277a8248".to_string(),
            jobs_module: "0xe54Ec561179e1E210c64A67f021F3Ba7ef9C18D0".to_string(),
            hypt_token: "0x7744D92137fDA24C3164Bdc9a467a4a25aCf1954".to_string(),
        }
    }
}

/// Polling intervals for display refresh, in milliseconds.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpdateIntervals {
    pub dashboard_ms: u64,
    pub agents_ms: u64,
    pub jobs_ms: u64,
}

impl Default for UpdateIntervals {
    fn default() -> Self {
        Self {
            dashboard_ms: 30_000,
            agents_ms: 60_000,
            jobs_ms: 15_000,
        }
    }
}

/// Session behaviour.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Fail the connection when the endpoint reports a different chain ID.
    pub verify_chain_id: bool,

    /// Optional probe timeout in seconds. Unset means the transport default.
    pub probe_timeout_secs: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            verify_chain_id: true,
            probe_timeout_secs: None,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default log filter when `RUST_LOG` is not set.
    pub log_level: String,

    /// Emit logs as JSON lines.
    pub json_logs: bool,

    /// Enable the Prometheus exporter.
    pub metrics_enabled: bool,

    /// Metrics listener address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "hypt_monitor=info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
