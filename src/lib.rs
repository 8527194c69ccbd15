//! Replica Tuner Library

pub mod chart;
pub mod config;
pub mod control;
pub mod lifecycle;
pub mod observability;
pub mod publish;
pub mod usage;

pub use config::schema::TunerConfig;
pub use control::{Controller, CycleReport};
pub use lifecycle::Shutdown;
