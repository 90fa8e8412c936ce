//! Read-only JSON-RPC transport.
//!
//! # Responsibilities
//! - Build an HTTP provider for the configured endpoint
//! - Run the reachability probe (`eth_chainId`)
//! - Classify transport failures into [`ConnectionError`]

use std::time::Duration;

use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::transports::{RpcError, TransportError};
use tokio::time::timeout;
use url::Url;

use crate::blockchain::types::{ChainId, ConnectionError, ConnectionResult};

/// Shared request/response channel to one RPC gateway.
///
/// Cloning is cheap; clones talk to the same underlying provider.
#[derive(Clone)]
pub struct RpcTransport {
    provider: DynProvider,
    endpoint: Url,
}

impl RpcTransport {
    /// Build a transport for `rpc_url`. No network I/O happens here.
    pub fn new(rpc_url: &str) -> ConnectionResult<Self> {
        let endpoint: Url =
            rpc_url
                .trim()
                .parse()
                .map_err(|e: url::ParseError| ConnectionError::InvalidEndpoint {
                    url: rpc_url.to_string(),
                    reason: e.to_string(),
                })?;

        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ConnectionError::InvalidEndpoint {
                url: rpc_url.to_string(),
                reason: format!("unsupported scheme '{}'", endpoint.scheme()),
            });
        }

        let provider = ProviderBuilder::new()
            .connect_http(endpoint.clone())
            .erased();

        Ok(Self { provider, endpoint })
    }

    /// Ask the endpoint which chain it serves.
    ///
    /// With `limit` unset the call waits as long as the HTTP client does.
    pub async fn probe(&self, limit: Option<Duration>) -> ConnectionResult<ChainId> {
        let call = self.provider.get_chain_id();
        let result = match limit {
            Some(duration) => timeout(duration, call)
                .await
                .map_err(|_| ConnectionError::Timeout(duration.as_secs()))?,
            None => call.await,
        };

        match result {
            Ok(id) => {
                tracing::debug!(endpoint = %self.endpoint, chain_id = id, "Reachability probe succeeded");
                Ok(ChainId(id))
            }
            Err(e) => {
                tracing::warn!(endpoint = %self.endpoint, error = %e, "Reachability probe failed");
                Err(classify(e))
            }
        }
    }

    /// The underlying provider, shared by every contract binding.
    pub fn provider(&self) -> &DynProvider {
        &self.provider
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl std::fmt::Debug for RpcTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcTransport")
            .field("endpoint", &self.endpoint.as_str())
            .finish()
    }
}

fn classify(err: TransportError) -> ConnectionError {
    match err {
        RpcError::DeserError { .. } | RpcError::NullResp => {
            ConnectionError::MalformedResponse(err.to_string())
        }
        other => ConnectionError::Transport(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_url_rejected() {
        let err = RpcTransport::new("not a url").unwrap_err();
        assert!(matches!(err, ConnectionError::InvalidEndpoint { .. }));
        assert!(err.to_string().contains("not a url"));
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        let err = RpcTransport::new("ftp://example.com/rpc").unwrap_err();
        assert!(err.to_string().contains("unsupported scheme"));
    }

    #[tokio::test]
    async fn test_probe_unreachable_endpoint() {
        // Reserve a port, then free it so nothing is listening there.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport = RpcTransport::new(&format!("http://{addr}")).unwrap();
        let err = transport.probe(Some(Duration::from_secs(5))).await.unwrap_err();
        assert!(matches!(
            err,
            ConnectionError::Transport(_) | ConnectionError::Timeout(_)
        ));
    }
}
