//! Periodic refresh loop behind `hypt-monitor watch`.
//!
//! Every dashboard tick refreshes the store and, when the session is not
//! connected, makes one connection attempt. Retrying on the next tick is
//! this loop's policy; the session manager itself never retries.

use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time;

use crate::config::UpdateIntervals;
use crate::dashboard::DashboardStore;
use crate::session::SessionManager;

pub struct RefreshLoop<'a> {
    session: &'a SessionManager,
    store: &'a mut DashboardStore,
    interval: Duration,
}

impl<'a> RefreshLoop<'a> {
    pub fn new(
        session: &'a SessionManager,
        store: &'a mut DashboardStore,
        intervals: &UpdateIntervals,
    ) -> Self {
        Self {
            session,
            store,
            interval: Duration::from_millis(intervals.dashboard_ms.max(1)),
        }
    }

    /// Run until `shutdown` fires. Returns the number of completed ticks.
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) -> u64 {
        tracing::info!(interval_ms = self.interval.as_millis() as u64, "Refresh loop starting");

        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(time::MissedTickBehavior::Delay);
        let mut ticks = 0;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.tick().await;
                    ticks += 1;
                }
                _ = shutdown.recv() => {
                    tracing::info!(ticks, "Refresh loop received shutdown signal, exiting");
                    break;
                }
            }
        }

        ticks
    }

    async fn tick(&mut self) {
        if !self.session.is_connected() {
            if let Err(e) = self.session.connect().await {
                tracing::warn!(error = %e, "Connection attempt failed; retrying next tick");
            }
        }

        self.store.refresh();
        let stats = self.store.stats();
        tracing::info!(
            status = %self.session.status(),
            agents = stats.total_agents,
            jobs = stats.total_jobs,
            open = stats.open_jobs,
            "Dashboard tick"
        );
    }
}
