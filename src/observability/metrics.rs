//! Metrics collection and exposition.
//!
//! # Metrics
//! - `session_connect_attempts_total` (counter): connect calls by outcome
//! - `session_connected` (gauge): 1=connected, 0=otherwise
//! - `dashboard_refresh_total` (counter): dashboard refreshes
//!
//! Recording is a no-op until [`init_metrics`] installs an exporter.

use std::net::SocketAddr;

use metrics::{counter, gauge};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter with an HTTP scrape listener on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record the outcome of a `connect()` call ("ok" or "failed").
pub fn record_connect_attempt(outcome: &'static str) {
    counter!("session_connect_attempts_total", "outcome" => outcome).increment(1);
}

pub fn record_session_connected(connected: bool) {
    gauge!("session_connected").set(if connected { 1.0 } else { 0.0 });
}

pub fn record_dashboard_refresh() {
    counter!("dashboard_refresh_total").increment(1);
}
