//! Owned dashboard state.
//!
//! Callers construct a [`DashboardStore`] and pass it to whatever renders
//! it. Views that need to react to refreshes hold a receiver from
//! [`DashboardStore::subscribe`].

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use crate::dashboard::fixtures;
use crate::dashboard::types::{Activity, Agent, DashboardStats, Job, JobState, MultihopJob};
use crate::observability::metrics;

/// Agents, jobs and multihop jobs for display, plus refresh bookkeeping.
#[derive(Debug)]
pub struct DashboardStore {
    agents: Vec<Agent>,
    jobs: Vec<Job>,
    multihop_jobs: Vec<MultihopJob>,
    recent_activity: Vec<Activity>,
    is_loading: bool,
    last_update: DateTime<Utc>,
    updates: watch::Sender<DateTime<Utc>>,
}

impl DashboardStore {
    pub fn new(agents: Vec<Agent>, jobs: Vec<Job>, multihop_jobs: Vec<MultihopJob>) -> Self {
        let now = Utc::now();
        let (updates, _) = watch::channel(now);
        Self {
            agents,
            jobs,
            multihop_jobs,
            recent_activity: Vec::new(),
            is_loading: false,
            last_update: now,
            updates,
        }
    }

    /// A store preloaded with the built-in sample records.
    pub fn with_sample_data() -> Self {
        let now = Utc::now().timestamp();
        Self::new(
            fixtures::sample_agents(),
            fixtures::sample_jobs(now),
            fixtures::sample_multihop_jobs(),
        )
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn multihop_jobs(&self) -> &[MultihopJob] {
        &self.multihop_jobs
    }

    pub fn recent_activity(&self) -> &[Activity] {
        &self.recent_activity
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn last_update(&self) -> DateTime<Utc> {
        self.last_update
    }

    pub fn jobs_in_state(&self, state: JobState) -> impl Iterator<Item = &Job> {
        self.jobs.iter().filter(move |job| job.state == state)
    }

    pub fn verifier_agents(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter().filter(|agent| agent.is_verifier)
    }

    /// Aggregate counts over the current records.
    pub fn stats(&self) -> DashboardStats {
        let multihop_steps: usize = self
            .multihop_jobs
            .iter()
            .map(|mh| mh.steps_count as usize)
            .sum();

        DashboardStats {
            total_agents: self.agents.len(),
            total_jobs: self.jobs.len() + multihop_steps,
            open_jobs: self.jobs_in_state(JobState::Open).count(),
            accepted_jobs: self.jobs_in_state(JobState::Accepted).count(),
            completed_jobs: self.jobs_in_state(JobState::Completed).count(),
            cancelled_jobs: self.jobs_in_state(JobState::Cancelled).count(),
            verifier_agents: self.verifier_agents().count(),
            total_multihop_jobs: self.multihop_jobs.len(),
        }
    }

    /// Mark the data as freshly loaded and notify subscribers.
    ///
    /// Records are static, so this only moves the update timestamp.
    pub fn refresh(&mut self) {
        self.is_loading = true;
        self.last_update = Utc::now();
        self.is_loading = false;

        self.updates.send_replace(self.last_update);
        metrics::record_dashboard_refresh();
        tracing::debug!(last_update = %self.last_update, "Dashboard refreshed");
    }

    /// Receive the timestamp of every subsequent refresh.
    pub fn subscribe(&self) -> watch::Receiver<DateTime<Utc>> {
        self.updates.subscribe()
    }
}

impl Default for DashboardStore {
    fn default() -> Self {
        Self::with_sample_data()
    }
}
