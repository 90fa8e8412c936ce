//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → MonitorConfig (validated, immutable)
//!     → handed to SessionManager / DashboardStore / CLI
//! ```
//!
//! # Design Decisions
//! - Config is static for the life of the process; there is no reload
//! - All fields have defaults so the binary runs with no file at all
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, override_rpc_url, parse_config, ConfigError};
pub use schema::ContractsConfig;
pub use schema::MonitorConfig;
pub use schema::NetworkConfig;
pub use schema::ObservabilityConfig;
pub use schema::SessionConfig;
pub use schema::UpdateIntervals;
