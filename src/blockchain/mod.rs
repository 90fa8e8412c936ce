//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! NetworkConfig (RPC URL, chain ID)
//!     → client.rs (HTTP provider, reachability probe)
//! ContractsConfig (three addresses)
//!     → contracts.rs (address + interface + shared provider per contract)
//! ```
//!
//! # Constraints
//! - Read-only: nothing here signs or broadcasts
//! - One provider per session, shared by every binding
//! - Interfaces are static and compiled into the binary

pub mod client;
pub mod contracts;
pub mod types;

pub use client::RpcTransport;
pub use contracts::{Bindings, ContractAddresses, ContractBinding};
pub use types::{ChainId, ConnectionError, ConnectionResult, ContractName};
