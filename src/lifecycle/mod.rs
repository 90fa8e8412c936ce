//! Lifecycle management for the `watch` command.
//!
//! # Data Flow
//! ```text
//! signals.rs:  SIGINT/SIGTERM → Shutdown::trigger
//! shutdown.rs: broadcast → refresh loop exits → session disconnected
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
