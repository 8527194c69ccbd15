//! Configuration validation.
//!
//! Serde handles the syntax; this module checks values the loop cannot run
//! with. All problems are collected, not just the first.

use std::fmt;

use crate::config::schema::TunerConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending key.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, returning every error found.
pub fn validate_config(config: &TunerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !config.threshold.is_finite() || config.threshold < 0.0 {
        errors.push(ValidationError::new(
            "threshold",
            format!("must be a finite, non-negative number (got {})", config.threshold),
        ));
    }

    if config.interval_secs == 0 {
        errors.push(ValidationError::new("interval_secs", "must be greater than zero"));
    }

    match url::Url::parse(&config.metrics.prometheus_url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(ValidationError::new(
            "metrics.prometheus_url",
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new(
            "metrics.prometheus_url",
            format!("invalid URL: {}", e),
        )),
    }

    if config.metrics.query.trim().is_empty() {
        errors.push(ValidationError::new("metrics.query", "must not be empty"));
    }
    if config.metrics.target.is_empty() {
        errors.push(ValidationError::new("metrics.target", "must not be empty"));
    }
    if config.metrics.target_label.is_empty() {
        errors.push(ValidationError::new("metrics.target_label", "must not be empty"));
    }
    if config.metrics.timeout_secs == Some(0) {
        errors.push(ValidationError::new("metrics.timeout_secs", "must be greater than zero when set"));
    }

    if config.chart.values_file.is_empty() {
        errors.push(ValidationError::new("chart.values_file", "must not be empty"));
    }
    if config.chart.replica_field.is_empty() {
        errors.push(ValidationError::new("chart.replica_field", "must not be empty"));
    }

    if config.publish.commit_message.trim().is_empty() {
        errors.push(ValidationError::new("publish.commit_message", "must not be empty"));
    }
    if config.publish.branch.is_some() && config.publish.remote.is_none() {
        errors.push(ValidationError::new("publish.branch", "requires publish.remote"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<std::net::SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("not a socket address: '{}'", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&TunerConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = TunerConfig::default();
        config.threshold = f64::NAN;
        config.interval_secs = 0;
        config.metrics.prometheus_url = "not a url".to_string();
        config.publish.branch = Some("main".to_string());

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec!["threshold", "interval_secs", "metrics.prometheus_url", "publish.branch"]
        );
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let mut config = TunerConfig::default();
        config.metrics.prometheus_url = "ftp://metrics.local".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].to_string().contains("unsupported scheme 'ftp'"));
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = TunerConfig::default();
        config.observability.metrics_address = "nowhere".to_string();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }
}
