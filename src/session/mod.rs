//! Read-only connection session.
//!
//! # Data Flow
//! ```text
//! SessionManager::connect()
//!     → Connecting snapshot published
//!     → blockchain::RpcTransport::probe (eth_chainId)
//!     → blockchain::Bindings::bind (three contracts, one provider)
//!     → Connected | Failed snapshot published
//!
//! Displays:
//!     snapshot() for the current state
//!     subscribe() for status changes
//! ```

pub mod manager;
pub mod state;

pub use manager::SessionManager;
pub use state::{Session, SessionStatus};
