//! Chain-specific types and error definitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Logical name of a bound contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContractName {
    IdentityRegistry,
    JobsModule,
    HyptToken,
}

impl ContractName {
    /// Every contract a connected session binds, in binding order.
    pub const ALL: [ContractName; 3] = [
        ContractName::IdentityRegistry,
        ContractName::JobsModule,
        ContractName::HyptToken,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContractName::IdentityRegistry => "identity-registry",
            ContractName::JobsModule => "jobs-module",
            ContractName::HyptToken => "hypt-token",
        }
    }
}

impl fmt::Display for ContractName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContractName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "identity-registry" | "identity_registry" | "IdentityRegistry" => {
                Ok(ContractName::IdentityRegistry)
            }
            "jobs-module" | "jobs_module" | "JobsModule" => Ok(ContractName::JobsModule),
            "hypt-token" | "hypt_token" | "HyptToken" => Ok(ContractName::HyptToken),
            other => Err(format!(
                "unknown contract '{other}' (expected identity-registry, jobs-module or hypt-token)"
            )),
        }
    }
}

/// Errors that can occur while connecting or reading through a session.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// Configured endpoint is not a usable URL.
    #[error("Invalid RPC URL '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Transport(String),

    /// The endpoint answered with something that is not a JSON-RPC result.
    #[error("Malformed RPC response: {0}")]
    MalformedResponse(String),

    /// Probe did not finish within the configured timeout.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Endpoint reports a different network than configured.
    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },

    /// A contract address or interface definition could not be used.
    #[error("Contract {contract} unusable: {reason}")]
    Interface { contract: ContractName, reason: String },

    /// A read was attempted without a connected session.
    #[error("Session not connected")]
    NotConnected,

    /// A contract read failed.
    #[error("Call to {contract}.{function} failed: {reason}")]
    Call {
        contract: ContractName,
        function: String,
        reason: String,
    },
}

/// Result type for session operations.
pub type ConnectionResult<T> = Result<T, ConnectionError>;
