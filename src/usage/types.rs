//! Prometheus query response schema and sampling errors.

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

/// Body of `GET /api/v1/query`.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub status: String,
    pub data: QueryData,
}

impl QueryResponse {
    /// Prometheus reports `"success"`; anything else (including a missing
    /// status) is worth a warning even when `data` decoded.
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    /// Only instant vectors carry one `value` pair per series.
    pub fn is_vector(&self) -> bool {
        self.data.result_type.is_empty() || self.data.result_type == "vector"
    }
}

/// The `data` member of a query response.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryData {
    #[serde(rename = "resultType", default)]
    pub result_type: String,
    pub result: Vec<Series>,
}

/// One instant-vector entry.
#[derive(Debug, Clone, Deserialize)]
pub struct Series {
    #[serde(default)]
    pub metric: HashMap<String, String>,
    /// `[unix_timestamp, "value"]`; Prometheus encodes the number as a string.
    pub value: (f64, String),
}

impl Series {
    /// Label value, if the series carries that label.
    pub fn label(&self, name: &str) -> Option<&str> {
        self.metric.get(name).map(String::as_str)
    }
}

/// Why a usable sample could not be produced.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// The request never produced a response.
    #[error("request to metrics backend failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("metrics backend returned HTTP {0}")]
    Status(u16),

    /// The body did not match the expected response shape.
    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),

    /// No series label contained the target substring.
    #[error("no series with {label} matching '{target}'")]
    NoMatch { label: String, target: String },

    /// The matched series carried a value that is not a number.
    #[error("series '{series}' has non-numeric value '{value}'")]
    InvalidValue { series: String, value: String },
}

/// Result of one sampling attempt.
#[derive(Debug)]
pub enum Sample {
    /// A value read from the matched series.
    Sampled(f64),
    /// No usable signal this cycle.
    NoSignal(MetricsError),
}

impl Sample {
    /// Numeric view used for threshold comparison. `NoSignal` reads as zero.
    pub fn value(&self) -> f64 {
        match self {
            Sample::Sampled(v) => *v,
            Sample::NoSignal(_) => 0.0,
        }
    }

    pub fn is_signal(&self) -> bool {
        matches!(self, Sample::Sampled(_))
    }
}

impl From<Result<f64, MetricsError>> for Sample {
    fn from(result: Result<f64, MetricsError>) -> Self {
        match result {
            Ok(v) => Sample::Sampled(v),
            Err(e) => Sample::NoSignal(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_query_response() {
        let body = r#"{
            "status": "success",
            "data": {
                "resultType": "vector",
                "result": [
                    { "metric": { "pod": "nginx-auto-tuned-7c9d" }, "value": [1712345678.123, "0.0421"] }
                ]
            }
        }"#;
        let resp: QueryResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.status, "success");
        assert_eq!(resp.data.result_type, "vector");
        assert_eq!(resp.data.result[0].label("pod"), Some("nginx-auto-tuned-7c9d"));
        assert_eq!(resp.data.result[0].value.1, "0.0421");
        assert!(resp.is_success());
        assert!(resp.is_vector());
    }

    #[test]
    fn test_status_and_result_type_checks() {
        let body = r#"{ "status": "warning", "data": { "resultType": "scalar", "result": [] } }"#;
        let resp: QueryResponse = serde_json::from_str(body).unwrap();
        assert!(!resp.is_success());
        assert!(!resp.is_vector());

        let bare: QueryResponse = serde_json::from_str(r#"{ "data": { "result": [] } }"#).unwrap();
        assert!(!bare.is_success());
        assert!(bare.is_vector());
    }

    #[test]
    fn test_shape_mismatch_is_an_error() {
        let body = r#"{ "data": { "result": [ { "metric": {}, "value": "oops" } ] } }"#;
        assert!(serde_json::from_str::<QueryResponse>(body).is_err());
    }

    #[test]
    fn test_no_signal_reads_as_zero() {
        let sample = Sample::from(Err(MetricsError::Status(503)));
        assert!(!sample.is_signal());
        assert_eq!(sample.value(), 0.0);
        assert_eq!(Sample::Sampled(0.5).value(), 0.5);
    }
}
