//! Git propagation subsystem.
//!
//! # Data Flow
//! ```text
//! ReplicaChange applied
//!     → pipeline.rs (add → commit → push, each attempted)
//!     → runner.rs (CommandRunner: child process or test double)
//!     → PublishReport (one StepOutcome per step)
//! ```
//!
//! # Design Decisions
//! - Steps are independent: a failed commit does not skip the push
//! - No rollback; partial publishes are reported, not repaired
//! - No deadline on child processes

pub mod pipeline;
pub mod runner;

pub use pipeline::{PublishError, PublishReport, PublishStep, Publisher, StepOutcome};
pub use runner::{CommandOutput, CommandRunner, ProcessRunner};
