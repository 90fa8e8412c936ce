//! Session snapshot and status machine.
//!
//! # States
//! ```text
//! Disconnected ─connect()─▶ Connecting ─probe ok──▶ Connected
//!       ▲                       │                      │
//!       │                       └─probe failed─▶ Failed │
//!       └────────────── disconnect() (from any) ◀──────┘
//! ```
//!
//! A [`Session`] can only be built through the four state constructors, so
//! bindings exist only while Connected and an error only while Failed.

use std::fmt;

use alloy::primitives::Address;
use serde::Serialize;

use crate::blockchain::{Bindings, ChainId, RpcTransport};

/// Connection status observed by displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SessionStatus {
    Disconnected,
    Connecting,
    Connected,
    Failed,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionStatus::Disconnected => "disconnected",
            SessionStatus::Connecting => "connecting",
            SessionStatus::Connected => "connected",
            SessionStatus::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// Immutable view of the connection at one point in time.
#[derive(Debug, Clone)]
pub struct Session {
    endpoint: String,
    network_identity: ChainId,
    status: SessionStatus,
    transport: Option<RpcTransport>,
    bindings: Option<Bindings>,
    last_error: Option<String>,
    placeholder_account: Option<Address>,
}

impl Session {
    pub fn disconnected(endpoint: impl Into<String>, network_identity: ChainId) -> Self {
        Self {
            endpoint: endpoint.into(),
            network_identity,
            status: SessionStatus::Disconnected,
            transport: None,
            bindings: None,
            last_error: None,
            placeholder_account: None,
        }
    }

    pub fn connecting(endpoint: impl Into<String>, network_identity: ChainId) -> Self {
        Self {
            status: SessionStatus::Connecting,
            ..Self::disconnected(endpoint, network_identity)
        }
    }

    /// A live session. The account is the zero address: nothing is ever
    /// signed, it only fills the "account" slot in displays.
    pub fn connected(
        endpoint: impl Into<String>,
        network_identity: ChainId,
        transport: RpcTransport,
        bindings: Bindings,
    ) -> Self {
        Self {
            status: SessionStatus::Connected,
            transport: Some(transport),
            bindings: Some(bindings),
            placeholder_account: Some(Address::ZERO),
            ..Self::disconnected(endpoint, network_identity)
        }
    }

    pub fn failed(
        endpoint: impl Into<String>,
        network_identity: ChainId,
        error: impl Into<String>,
    ) -> Self {
        Self {
            status: SessionStatus::Failed,
            last_error: Some(error.into()),
            ..Self::disconnected(endpoint, network_identity)
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn network_identity(&self) -> ChainId {
        self.network_identity
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_connected(&self) -> bool {
        self.status == SessionStatus::Connected
    }

    pub fn transport(&self) -> Option<&RpcTransport> {
        self.transport.as_ref()
    }

    pub fn bindings(&self) -> Option<&Bindings> {
        self.bindings.as_ref()
    }

    /// Number of bound contracts; zero unless Connected.
    pub fn binding_count(&self) -> usize {
        self.bindings.as_ref().map_or(0, Bindings::len)
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn placeholder_account(&self) -> Option<Address> {
        self.placeholder_account
    }
}
