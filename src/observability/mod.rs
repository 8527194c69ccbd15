//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Control loop, sampler, mutator, publisher
//!     → logging.rs (structured tracing events to stdout)
//!     → metrics.rs (counters and gauges, optional scrape endpoint)
//! ```

pub mod logging;
pub mod metrics;
