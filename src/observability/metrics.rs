//! Metrics collection and exposition.
//!
//! # Metrics
//! - `tuner_cycles_total` (counter): completed control cycles
//! - `tuner_no_signal_total` (counter): cycles without a usable sample
//! - `tuner_breaches_total` (counter): cycles where usage exceeded the threshold
//! - `tuner_mutations_total` (counter): values rewrites, by result
//! - `tuner_publish_steps_total` (counter): git steps, by step and result
//! - `tuner_cpu_usage` (gauge): last sampled usage
//! - `tuner_replica_count` (gauge): last written replica count
//!
//! Without an installed exporter every call is a no-op.

use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_sample(usage: f64, has_signal: bool, breached: bool) {
    metrics::counter!("tuner_cycles_total").increment(1);
    metrics::gauge!("tuner_cpu_usage").set(usage);
    if !has_signal {
        metrics::counter!("tuner_no_signal_total").increment(1);
    }
    if breached {
        metrics::counter!("tuner_breaches_total").increment(1);
    }
}

pub fn record_mutation(replicas: Option<u64>) {
    match replicas {
        Some(count) => {
            metrics::counter!("tuner_mutations_total", "result" => "ok").increment(1);
            metrics::gauge!("tuner_replica_count").set(count as f64);
        }
        None => metrics::counter!("tuner_mutations_total", "result" => "error").increment(1),
    }
}

pub fn record_publish_step(step: &'static str, ok: bool) {
    let result = if ok { "ok" } else { "error" };
    metrics::counter!("tuner_publish_steps_total", "step" => step, "result" => result).increment(1);
}
