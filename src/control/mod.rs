//! Control loop subsystem.
//!
//! # Data Flow
//! ```text
//! Idle
//!   → Sampling     (usage::MetricsClient, no signal reads as 0)
//!   → Evaluating   (evaluator.rs, usage > threshold)
//!   → Mutating     (chart::ValuesFile, replicaCount + 1)
//!   → Publishing   (publish::Publisher, add/commit/push)
//!   → CoolingDown  (fixed pause, then Idle)
//! ```
//!
//! # Design Decisions
//! - One sequential task; a cycle finishes before the pause starts
//! - Nothing carries over between cycles except the files on disk
//! - Every failure is logged and absorbed; the pause is the only retry

pub mod controller;
pub mod evaluator;
pub mod state;

pub use controller::{Controller, CycleReport};
pub use evaluator::is_breached;
pub use state::CyclePhase;
