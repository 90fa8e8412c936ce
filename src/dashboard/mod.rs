//! Dashboard data.
//!
//! Sample records shaped like the registry and jobs contracts, held in an
//! explicitly owned store instead of process-global state.

pub mod fixtures;
pub mod store;
pub mod types;

pub use store::DashboardStore;
pub use types::{
    Activity, Agent, AgentMetadata, DashboardStats, Job, JobState, MultihopJob, MultihopState,
};
