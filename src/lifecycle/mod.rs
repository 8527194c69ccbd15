//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Shutdown::trigger
//!
//! Shutdown (shutdown.rs):
//!     watch flag → control loop leaves its cool-down pause → exit
//! ```
//!
//! # Design Decisions
//! - An in-flight cycle is never interrupted; only the pause is
//! - No drain deadline: a hung git or HTTP call delays exit

pub mod shutdown;
pub mod signals;

pub use shutdown::{Shutdown, ShutdownListener};
