//! Sample records for running the dashboard without chain reads.

use alloy::primitives::{address, Address, U256};

use crate::dashboard::types::{Agent, AgentMetadata, Job, JobState, MultihopJob, MultihopState};

const SAMPLE_OWNER: Address = address!("742d35Cc6634C0532925a3b844Bc454e4438f44e");

const HOUR: i64 = 3600;

fn hypt(whole: u64) -> U256 {
    U256::from(whole) * U256::from(10u64).pow(U256::from(18u64))
}

fn agent(id: u64, is_verifier: bool, name: &str, description: &str, clients: &[Address]) -> Agent {
    Agent {
        id,
        owner: SAMPLE_OWNER,
        is_verifier,
        token_uri: String::new(),
        metadata: AgentMetadata {
            name: name.to_string(),
            description: description.to_string(),
        },
        clients: clients.to_vec(),
    }
}

pub fn sample_agents() -> Vec<Agent> {
    let a = address!("1234567890123456789012345678901234567890");
    let b = address!("abcdefabcdefabcdefabcdefabcdefabcdefabcd");
    vec![
        agent(
            1,
            false,
            "Data Analyst Agent",
            "Specialized in data processing and analysis tasks",
            &[a, b],
        ),
        agent(
            2,
            true,
            "Security Audit Agent",
            "Expert in smart contract security and auditing",
            &[a],
        ),
        agent(
            3,
            false,
            "AI Training Agent",
            "Handles machine learning model training and optimization",
            &[b, address!("1111111111111111111111111111111111111111")],
        ),
        agent(
            4,
            true,
            "DeFi Strategy Agent",
            "Optimizes yield farming and DeFi investment strategies",
            &[address!("2222222222222222222222222222222222222222")],
        ),
        agent(
            5,
            false,
            "Blockchain Monitor Agent",
            "Monitors blockchain transactions and network activity",
            &[
                address!("3333333333333333333333333333333333333333"),
                address!("4444444444444444444444444444444444444444"),
                address!("5555555555555555555555555555555555555555"),
            ],
        ),
    ]
}

/// Sample jobs, timestamped relative to `now` (unix seconds).
pub fn sample_jobs(now: i64) -> Vec<Job> {
    let job = |id, description: &str, state, agent_id, budget, age| Job {
        id,
        description: description.to_string(),
        state,
        agent_id,
        budget: hypt(budget),
        creator: SAMPLE_OWNER,
        created_at: now - age,
    };

    vec![
        job(1, "Data analysis task for customer insights", JobState::Open, 1, 100, HOUR),
        job(2, "Smart contract audit and security review", JobState::Accepted, 2, 500, 2 * HOUR),
        job(3, "AI model training for image recognition", JobState::Completed, 3, 200, 24 * HOUR),
        job(4, "Blockchain transaction monitoring service", JobState::Open, 1, 75, HOUR / 2),
        job(5, "DeFi yield optimization strategy", JobState::Accepted, 4, 300, 3 * HOUR),
    ]
}

pub fn sample_multihop_jobs() -> Vec<MultihopJob> {
    vec![
        MultihopJob {
            id: 1,
            state: MultihopState::Active,
            creator: SAMPLE_OWNER,
            steps_count: 3,
        },
        MultihopJob {
            id: 2,
            state: MultihopState::Completed,
            creator: SAMPLE_OWNER,
            steps_count: 5,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::format_balance;

    #[test]
    fn test_sample_budgets() {
        let jobs = sample_jobs(1_000_000);
        let budgets: Vec<String> = jobs
            .iter()
            .map(|j| format_balance(Some(j.budget), 18))
            .collect();
        assert_eq!(budgets, ["100.0", "500.0", "200.0", "75.0", "300.0"]);
    }

    #[test]
    fn test_sample_ages() {
        let jobs = sample_jobs(1_000_000);
        assert_eq!(jobs[0].created_at, 1_000_000 - 3600);
        assert_eq!(jobs[2].created_at, 1_000_000 - 86_400);
        assert_eq!(jobs[3].created_at, 1_000_000 - 1800);
    }
}
