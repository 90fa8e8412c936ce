//! Read-only HYPT network monitor library.

pub mod blockchain;
pub mod config;
pub mod dashboard;
pub mod display;
pub mod lifecycle;
pub mod observability;
pub mod refresh;
pub mod session;

pub use config::MonitorConfig;
pub use dashboard::DashboardStore;
pub use session::{Session, SessionManager, SessionStatus};
