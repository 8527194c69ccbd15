//! Prometheus instant-query client.
//!
//! # Responsibilities
//! - Issue the configured PromQL query against `/api/v1/query`
//! - Decode the response into the typed schema
//! - Pick the first series whose target label contains the selector
//! - Collapse every failure into a `Sample::NoSignal` for the control loop

use std::time::Duration;

use crate::config::MetricsConfig;
use crate::usage::types::{MetricsError, QueryResponse, Sample, Series};

/// Client for the metrics backend.
#[derive(Clone)]
pub struct MetricsClient {
    http: reqwest::Client,
    config: MetricsConfig,
}

impl MetricsClient {
    /// Build a client from configuration.
    pub fn new(config: MetricsConfig) -> Result<Self, MetricsError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build()?;

        Ok(Self { http, config })
    }

    /// Full query endpoint, without the query string.
    pub fn endpoint(&self) -> String {
        format!("{}/api/v1/query", self.config.prometheus_url.trim_end_matches('/'))
    }

    /// Fetch the current usage of the target workload.
    pub async fn fetch_usage(&self) -> Result<f64, MetricsError> {
        let request = self
            .http
            .get(self.endpoint())
            .query(&[("query", self.config.query.as_str())]);

        tracing::debug!(endpoint = %self.endpoint(), query = %self.config.query, "Querying metrics backend");

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(status = %status, body = %body, "Metrics backend response");

        if !status.is_success() {
            return Err(MetricsError::Status(status.as_u16()));
        }

        let parsed: QueryResponse = serde_json::from_str(&body)?;
        if !parsed.is_success() {
            tracing::warn!(status = %parsed.status, "Metrics backend reported non-success status");
        }
        if !parsed.is_vector() {
            tracing::warn!(result_type = %parsed.data.result_type, "Query did not return an instant vector");
        }
        let series = select_series(&parsed.data.result, &self.config.target_label, &self.config.target)
            .ok_or_else(|| MetricsError::NoMatch {
                label: self.config.target_label.clone(),
                target: self.config.target.clone(),
            })?;

        let name = series.label(&self.config.target_label).unwrap_or_default();
        tracing::info!(series = %name, "Matched target series");

        parse_value(series, &self.config.target_label)
    }

    /// Sample usage, logging and absorbing any failure.
    pub async fn sample(&self) -> Sample {
        let sample = Sample::from(self.fetch_usage().await);
        if let Sample::NoSignal(e) = &sample {
            match e {
                MetricsError::NoMatch { .. } => tracing::warn!(error = %e, "No usable usage signal"),
                _ => tracing::error!(error = %e, "Failed to sample usage"),
            }
        }
        sample
    }
}

impl std::fmt::Debug for MetricsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsClient")
            .field("prometheus_url", &self.config.prometheus_url)
            .field("target", &self.config.target)
            .finish()
    }
}

/// First series whose `label` value contains `target`. Backend order decides ties.
pub fn select_series<'a>(series: &'a [Series], label: &str, target: &str) -> Option<&'a Series> {
    series
        .iter()
        .find(|s| s.label(label).is_some_and(|v| v.contains(target)))
}

fn parse_value(series: &Series, label: &str) -> Result<f64, MetricsError> {
    let raw = series.value.1.trim();
    raw.parse::<f64>().map_err(|_| MetricsError::InvalidValue {
        series: series.label(label).unwrap_or_default().to_string(),
        value: raw.to_string(),
    })
}
