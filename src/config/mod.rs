//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! tuner.toml (optional)
//!     → loader.rs (parse & deserialize, or built-in defaults)
//!     → validation.rs (semantic checks)
//!     → TunerConfig (validated, immutable)
//!     → handed to the controller at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, ConfigError};
pub use schema::{ChartConfig, MetricsConfig, ObservabilityConfig, PublishConfig, TunerConfig};
