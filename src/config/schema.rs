//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the tuner.
//! All types derive Serde traits for deserialization from config files, and
//! every section has defaults so an empty file (or no file) is valid.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the replica tuner.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TunerConfig {
    /// Usage above this value triggers a scale-up. Equal does not.
    pub threshold: f64,

    /// Pause between the end of one cycle and the start of the next.
    pub interval_secs: u64,

    /// Metrics backend query settings.
    pub metrics: MetricsConfig,

    /// Location of the values document to mutate.
    pub chart: ChartConfig,

    /// Git propagation settings.
    pub publish: PublishConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for TunerConfig {
    fn default() -> Self {
        Self {
            threshold: 0.00003,
            interval_secs: 60,
            metrics: MetricsConfig::default(),
            chart: ChartConfig::default(),
            publish: PublishConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Prometheus query configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Base URL of the Prometheus HTTP API (without `/api/v1/...`).
    pub prometheus_url: String,

    /// PromQL expression, unencoded.
    pub query: String,

    /// Substring identifying the workload among the returned series.
    pub target: String,

    /// Series label the target substring is matched against.
    pub target_label: String,

    /// Optional request timeout. Unset means the request may block forever.
    pub timeout_secs: Option<u64>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            prometheus_url: "http://localhost:9090".to_string(),
            query: "avg(rate(container_cpu_usage_seconds_total[1m])) by (pod)".to_string(),
            target: "nginx-auto-tuned".to_string(),
            target_label: "pod".to_string(),
            timeout_secs: None,
        }
    }
}

/// Chart working-copy configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Git working directory containing the values file.
    pub repo_path: PathBuf,

    /// Values file name, relative to `repo_path`.
    pub values_file: String,

    /// Top-level key holding the replica count.
    pub replica_field: String,
}

impl ChartConfig {
    /// Full path of the values document.
    pub fn values_path(&self) -> PathBuf {
        self.repo_path.join(&self.values_file)
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            repo_path: PathBuf::from("charts/nginx"),
            values_file: "values.yaml".to_string(),
            replica_field: "replicaCount".to_string(),
        }
    }
}

/// Git propagation configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PublishConfig {
    /// Run add/commit/push after a mutation.
    pub enabled: bool,

    /// Message used for every automated commit.
    pub commit_message: String,

    /// Remote passed to `git push`. Unset pushes to the upstream.
    pub remote: Option<String>,

    /// Branch passed to `git push`. Only used together with `remote`.
    pub branch: Option<String>,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            commit_message: "auto: tuned replicas due to high CPU".to_string(),
            remote: None,
            branch: None,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Expose a Prometheus scrape endpoint for the tuner's own counters.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9464".to_string(),
        }
    }
}
