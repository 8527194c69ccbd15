//! Usage sampling subsystem.
//!
//! # Data Flow
//! ```text
//! MetricsConfig (URL, PromQL, target selector)
//!     → client.rs (HTTP GET /api/v1/query)
//!     → types.rs (typed response, first matching series)
//!     → Sample::Sampled(v) | Sample::NoSignal(cause)
//! ```
//!
//! A missing signal reads as zero usage, so transport and decode failures
//! never trigger a scale-up.

pub mod client;
pub mod types;

pub use client::MetricsClient;
pub use types::{MetricsError, QueryResponse, Sample, Series};
