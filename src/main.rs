//! hypt-monitor
//!
//! Read-only monitor for the HYPT agent network.
//!
//! # Architecture Overview
//!
//! ```text
//!   config (TOML / defaults)
//!        │
//!        ▼
//!   ┌──────────────┐  connect()   ┌──────────────┐  eth_chainId   ┌─────────────┐
//!   │   session    │─────────────▶│  blockchain  │───────────────▶│ RPC gateway │
//!   │   manager    │◀─────────────│  transport   │◀───────────────│             │
//!   └──────┬───────┘   bindings   └──────────────┘                └─────────────┘
//!          │ snapshot / subscribe
//!          ▼
//!   ┌──────────────┐   ┌──────────────┐
//!   │  CLI output  │◀──│  dashboard   │  (sample records, stats)
//!   └──────────────┘   └──────────────┘
//! ```

use std::path::PathBuf;

use alloy::dyn_abi::DynSolValue;
use clap::{Parser, Subcommand};
use serde::Serialize;

use hypt_monitor::blockchain::ContractName;
use hypt_monitor::config::{load_config, override_rpc_url, MonitorConfig};
use hypt_monitor::dashboard::{Agent, DashboardStats, Job, MultihopJob};
use hypt_monitor::display::{
    format_address, format_balance, format_timestamp, format_value, DEFAULT_DECIMALS,
};
use hypt_monitor::lifecycle::{signals, Shutdown};
use hypt_monitor::observability::{logging, metrics};
use hypt_monitor::refresh::RefreshLoop;
use hypt_monitor::{DashboardStore, SessionManager};

#[derive(Parser)]
#[command(name = "hypt-monitor")]
#[command(about = "Read-only monitor for the HYPT agent network", long_about = None)]
struct Cli {
    /// TOML config file (built-in Hedera testnet defaults otherwise)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured RPC endpoint
    #[arg(long)]
    rpc_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe the endpoint, bind the contracts and show the session
    Connect,
    /// Print dashboard records and statistics
    Dashboard {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Refresh the dashboard periodically until interrupted
    Watch,
    /// Call a read-only function on a bound contract
    Read {
        /// identity-registry, jobs-module or hypt-token
        contract: ContractName,
        /// Function name, e.g. totalSupply
        function: String,
        /// Arguments, coerced to the function's input types
        args: Vec<String>,
        /// Render integer results as token amounts with this many decimals
        #[arg(long)]
        decimals: Option<u8>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => MonitorConfig::default(),
    };
    if let Some(url) = cli.rpc_url {
        config = override_rpc_url(config, url)?;
    }

    logging::init_logging(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        network = %config.network.name,
        rpc_url = %config.network.rpc_url,
        "hypt-monitor starting"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics exporter");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    match cli.command {
        Commands::Connect => run_connect(&config).await,
        Commands::Dashboard { json } => run_dashboard(json),
        Commands::Watch => run_watch(&config).await,
        Commands::Read {
            contract,
            function,
            args,
            decimals,
        } => run_read(&config, contract, &function, &args, decimals).await,
    }
}

async fn run_connect(config: &MonitorConfig) -> Result<(), Box<dyn std::error::Error>> {
    let manager = SessionManager::new(config);
    let outcome = manager.connect().await;
    let session = manager.snapshot();

    println!("network:  {} (chain {})", config.network.name, session.network_identity());
    println!("endpoint: {}", session.endpoint());
    println!("status:   {}", session.status());
    if let Some(account) = session.placeholder_account() {
        println!("account:  {}", format_address(&account.to_checksum(None)));
    }
    if let Some(bindings) = session.bindings() {
        for binding in bindings.iter() {
            println!(
                "  {:<18} {}  ({} read functions)",
                binding.name(),
                binding.address(),
                binding.abi().functions.len()
            );
        }
    }
    if let Some(error) = session.last_error() {
        println!("error:    {error}");
    }

    outcome?;
    Ok(())
}

#[derive(Serialize)]
struct DashboardView<'a> {
    stats: DashboardStats,
    agents: &'a [Agent],
    jobs: &'a [Job],
    multihop_jobs: &'a [MultihopJob],
}

fn run_dashboard(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = DashboardStore::with_sample_data();

    if json {
        let view = DashboardView {
            stats: store.stats(),
            agents: store.agents(),
            jobs: store.jobs(),
            multihop_jobs: store.multihop_jobs(),
        };
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    let stats = store.stats();
    println!(
        "agents: {} ({} verifiers)   jobs: {} (open {}, accepted {}, completed {}, cancelled {})   multihop: {}",
        stats.total_agents,
        stats.verifier_agents,
        stats.total_jobs,
        stats.open_jobs,
        stats.accepted_jobs,
        stats.completed_jobs,
        stats.cancelled_jobs,
        stats.total_multihop_jobs,
    );

    println!("\nAgents");
    for agent in store.agents() {
        println!(
            "  #{:<3} {:<26} owner {}  clients {}{}",
            agent.id,
            agent.metadata.name,
            agent.formatted_owner(),
            agent.clients.len(),
            if agent.is_verifier { "  [verifier]" } else { "" },
        );
    }

    println!("\nJobs");
    for job in store.jobs() {
        println!(
            "  #{:<3} {:<10} {:>8} HYPT  agent #{}  {}  {}",
            job.id,
            job.state.label(),
            format_balance(Some(job.budget), DEFAULT_DECIMALS),
            job.agent_id,
            format_timestamp(Some(job.created_at)),
            job.description,
        );
    }

    println!("\nMultihop jobs");
    for mh in store.multihop_jobs() {
        println!("  #{:<3} {:?}  {} steps", mh.id, mh.state, mh.steps_count);
    }

    println!("\nlast update: {}", format_timestamp(Some(store.last_update().timestamp())));
    Ok(())
}

async fn run_watch(config: &MonitorConfig) -> Result<(), Box<dyn std::error::Error>> {
    let manager = SessionManager::new(config);
    let mut store = DashboardStore::with_sample_data();

    let shutdown = Shutdown::new();
    let stop = shutdown.subscribe();
    tokio::spawn(signals::shutdown_on_signal(shutdown));

    RefreshLoop::new(&manager, &mut store, &config.update_intervals)
        .run(stop)
        .await;

    manager.disconnect();
    tracing::info!("Shutdown complete");
    Ok(())
}

async fn run_read(
    config: &MonitorConfig,
    contract: ContractName,
    function: &str,
    args: &[String],
    decimals: Option<u8>,
) -> Result<(), Box<dyn std::error::Error>> {
    let manager = SessionManager::new(config);
    manager.connect().await?;

    let values = manager.read(contract, function, args).await?;
    for value in &values {
        let rendered = match (value, decimals) {
            (DynSolValue::Uint(amount, _), Some(d)) => format_balance(Some(*amount), d),
            _ => format_value(value),
        };
        println!("{rendered}");
    }

    manager.disconnect();
    Ok(())
}
