//! Connection session manager.
//!
//! # Responsibilities
//! - Establish and tear down the read-only link to the configured network
//! - Expose the contract bindings of the live session
//! - Publish every status transition to subscribers
//!
//! Overlapping `connect()` calls are not serialized: the last one to finish
//! wins the snapshot.

use std::sync::Arc;
use std::time::Duration;

use alloy::dyn_abi::DynSolValue;
use arc_swap::ArcSwap;
use tokio::sync::watch;

use crate::blockchain::{
    Bindings, ChainId, ConnectionError, ConnectionResult, ContractAddresses, ContractName,
    RpcTransport,
};
use crate::config::{ContractsConfig, MonitorConfig, NetworkConfig, SessionConfig};
use crate::observability::metrics;
use crate::session::state::{Session, SessionStatus};

/// Owns one [`Session`] and replaces it wholesale on every transition.
pub struct SessionManager {
    network: NetworkConfig,
    contracts: ContractsConfig,
    options: SessionConfig,
    current: ArcSwap<Session>,
    status_tx: watch::Sender<SessionStatus>,
}

impl SessionManager {
    /// Create a manager in the Disconnected state. No I/O is performed.
    pub fn new(config: &MonitorConfig) -> Self {
        Self::from_parts(
            config.network.clone(),
            config.contracts.clone(),
            config.session.clone(),
        )
    }

    pub fn from_parts(
        network: NetworkConfig,
        contracts: ContractsConfig,
        options: SessionConfig,
    ) -> Self {
        let initial = Session::disconnected(network.rpc_url.clone(), ChainId(network.chain_id));
        let (status_tx, _) = watch::channel(SessionStatus::Disconnected);
        Self {
            network,
            contracts,
            options,
            current: ArcSwap::from_pointee(initial),
            status_tx,
        }
    }

    /// Connect to the configured endpoint and bind the contracts.
    ///
    /// Any previous session is discarded first. On failure the session is
    /// left Failed with the error message recorded, and the same error is
    /// returned; nothing is retried.
    pub async fn connect(&self) -> ConnectionResult<()> {
        self.publish(Session::connecting(self.endpoint(), self.network_identity()));

        tracing::info!(
            network = %self.network.name,
            rpc_url = %self.network.rpc_url,
            chain_id = self.network.chain_id,
            "Connecting"
        );

        match self.establish().await {
            Ok((transport, bindings)) => {
                let binding_count = bindings.len();
                self.publish(Session::connected(
                    self.endpoint(),
                    self.network_identity(),
                    transport,
                    bindings,
                ));
                metrics::record_connect_attempt("ok");
                metrics::record_session_connected(true);
                tracing::info!(bindings = binding_count, "Session connected");
                Ok(())
            }
            Err(e) => {
                self.publish(Session::failed(
                    self.endpoint(),
                    self.network_identity(),
                    e.to_string(),
                ));
                metrics::record_connect_attempt("failed");
                metrics::record_session_connected(false);
                tracing::warn!(error = %e, "Session connection failed");
                Err(e)
            }
        }
    }

    async fn establish(&self) -> ConnectionResult<(RpcTransport, Bindings)> {
        let transport = RpcTransport::new(&self.network.rpc_url)?;

        let limit = self.options.probe_timeout_secs.map(Duration::from_secs);
        let chain_id = transport.probe(limit).await?;

        if chain_id.0 != self.network.chain_id {
            if self.options.verify_chain_id {
                return Err(ConnectionError::ChainMismatch {
                    expected: self.network.chain_id,
                    actual: chain_id.0,
                });
            }
            tracing::warn!(
                expected = self.network.chain_id,
                actual = chain_id.0,
                "Endpoint serves a different chain; verification disabled"
            );
        }

        let addresses = ContractAddresses::from_config(&self.contracts)?;
        let bindings = Bindings::bind(&addresses, &transport)?;
        Ok((transport, bindings))
    }

    /// Drop the transport and bindings. Safe from any state.
    pub fn disconnect(&self) {
        self.publish(Session::disconnected(self.endpoint(), self.network_identity()));
        metrics::record_session_connected(false);
        tracing::info!("Session disconnected");
    }

    /// Accepted for interface compatibility with signing clients; a
    /// read-only session is pinned to its configured endpoint.
    pub async fn switch_network(&self) -> ConnectionResult<()> {
        Ok(())
    }

    /// Read-only sessions never subscribe to chain events.
    pub fn setup_event_listeners(&self) {}

    /// The current session.
    pub fn snapshot(&self) -> Arc<Session> {
        self.current.load_full()
    }

    pub fn status(&self) -> SessionStatus {
        self.current.load().status()
    }

    pub fn is_connected(&self) -> bool {
        self.current.load().is_connected()
    }

    pub fn last_error(&self) -> Option<String> {
        self.current.load().last_error().map(str::to_string)
    }

    /// Bindings of the live session, if connected.
    pub fn bindings(&self) -> Option<Bindings> {
        self.current.load().bindings().cloned()
    }

    /// Receive every subsequent status transition.
    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.status_tx.subscribe()
    }

    /// Read `function` on a bound contract, coercing string arguments.
    pub async fn read(
        &self,
        contract: ContractName,
        function: &str,
        args: &[String],
    ) -> ConnectionResult<Vec<DynSolValue>> {
        let bindings = self.bindings().ok_or(ConnectionError::NotConnected)?;
        bindings.get(contract).call_str(function, args).await
    }

    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }

    fn endpoint(&self) -> String {
        self.network.rpc_url.clone()
    }

    fn network_identity(&self) -> ChainId {
        ChainId(self.network.chain_id)
    }

    fn publish(&self, session: Session) {
        let status = session.status();
        self.current.store(Arc::new(session));
        self.status_tx.send_replace(status);
        tracing::debug!(status = %status, "Session status changed");
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("rpc_url", &self.network.rpc_url)
            .field("chain_id", &self.network.chain_id)
            .field("status", &self.status())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager_for(rpc_url: &str) -> SessionManager {
        let mut config = MonitorConfig::default();
        config.network.rpc_url = rpc_url.to_string();
        SessionManager::new(&config)
    }

    #[test]
    fn test_starts_disconnected() {
        let manager = SessionManager::new(&MonitorConfig::default());
        assert_eq!(manager.status(), SessionStatus::Disconnected);
        assert!(manager.bindings().is_none());
        assert!(manager.last_error().is_none());
        assert_eq!(manager.snapshot().network_identity(), ChainId(296));
    }

    #[test]
    fn test_disconnect_when_disconnected() {
        let manager = SessionManager::new(&MonitorConfig::default());
        manager.disconnect();
        manager.disconnect();
        let session = manager.snapshot();
        assert_eq!(session.status(), SessionStatus::Disconnected);
        assert_eq!(session.binding_count(), 0);
        assert!(session.placeholder_account().is_none());
    }

    #[tokio::test]
    async fn test_invalid_endpoint_fails_without_panicking() {
        let manager = manager_for("::not-a-url::");
        let err = manager.connect().await.unwrap_err();

        assert!(matches!(err, ConnectionError::InvalidEndpoint { .. }));
        assert_eq!(manager.status(), SessionStatus::Failed);
        assert_eq!(manager.last_error(), Some(err.to_string()));
        assert!(manager.bindings().is_none());
    }

    #[tokio::test]
    async fn test_failed_then_disconnect_clears_error() {
        let manager = manager_for("::not-a-url::");
        let _ = manager.connect().await;
        manager.disconnect();
        assert_eq!(manager.status(), SessionStatus::Disconnected);
        assert!(manager.last_error().is_none());
    }

    #[tokio::test]
    async fn test_switch_network_is_noop() {
        let manager = SessionManager::new(&MonitorConfig::default());
        manager.switch_network().await.unwrap();
        manager.setup_event_listeners();
        assert_eq!(manager.status(), SessionStatus::Disconnected);
        assert_eq!(manager.snapshot().endpoint(), "https://testnet.hashio.io/api");
    }

    #[tokio::test]
    async fn test_read_requires_connection() {
        let manager = SessionManager::new(&MonitorConfig::default());
        let err = manager
            .read(ContractName::HyptToken, "totalSupply", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, ConnectionError::NotConnected));
    }

    #[tokio::test]
    async fn test_subscribers_see_failure() {
        let manager = manager_for("::not-a-url::");
        let mut rx = manager.subscribe();
        let _ = manager.connect().await;
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), SessionStatus::Failed);
    }
}
