//! Record types shaped like the on-chain registry and jobs entities.

use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::display::format_address;

/// Lifecycle of a single job in the jobs module.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobState {
    Open = 0,
    Accepted = 1,
    Completed = 2,
    Cancelled = 3,
}

impl JobState {
    pub fn label(&self) -> &'static str {
        match self {
            JobState::Open => "Open",
            JobState::Accepted => "Accepted",
            JobState::Completed => "Completed",
            JobState::Cancelled => "Cancelled",
        }
    }
}

impl TryFrom<u8> for JobState {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(JobState::Open),
            1 => Ok(JobState::Accepted),
            2 => Ok(JobState::Completed),
            3 => Ok(JobState::Cancelled),
            other => Err(other),
        }
    }
}

/// Lifecycle of a multi-step job.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MultihopState {
    Active = 0,
    Completed = 1,
}

/// Off-chain metadata attached to an agent token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentMetadata {
    pub name: String,
    pub description: String,
}

/// An agent registered in the identity registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub id: u64,
    pub owner: Address,
    pub is_verifier: bool,
    pub token_uri: String,
    pub metadata: AgentMetadata,
    pub clients: Vec<Address>,
}

impl Agent {
    /// Shortened owner address for list views.
    pub fn formatted_owner(&self) -> String {
        format_address(&self.owner.to_checksum(None))
    }
}

/// A single-agent job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: u64,
    pub description: String,
    pub state: JobState,
    pub agent_id: u64,
    /// Budget in HYPT base units (18 decimals).
    pub budget: U256,
    pub creator: Address,
    /// Unix seconds.
    pub created_at: i64,
}

/// A job split across several agents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultihopJob {
    pub id: u64,
    pub state: MultihopState,
    pub creator: Address,
    pub steps_count: u32,
}

/// Aggregate counts shown at the top of the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_agents: usize,
    /// Single jobs plus every multihop step.
    pub total_jobs: usize,
    pub open_jobs: usize,
    pub accepted_jobs: usize,
    pub completed_jobs: usize,
    pub cancelled_jobs: usize,
    pub verifier_agents: usize,
    pub total_multihop_jobs: usize,
}

/// An entry in the recent-activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub summary: String,
    pub timestamp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_state_round_trip() {
        for raw in 0u8..4 {
            let state = JobState::try_from(raw).unwrap();
            assert_eq!(state as u8, raw);
        }
        assert_eq!(JobState::try_from(4), Err(4));
    }

    #[test]
    fn test_formatted_owner() {
        let agent = Agent {
            id: 1,
            owner: "0x742d35Cc6634C0532925a3b844Bc454e4438f44e".parse().unwrap(),
            is_verifier: false,
            token_uri: String::new(),
            metadata: AgentMetadata {
                name: "n".into(),
                description: "d".into(),
            },
            clients: Vec::new(),
        };
        assert_eq!(agent.formatted_owner(), "0x742d...f44e");
    }
}
