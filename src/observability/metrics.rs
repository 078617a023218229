//! Metrics collection and exposition.
//!
//! # Metrics
//! - `trigger_probe_attempts_total` (counter): attempts by result
//!   (`matched`, `http_error`, `transport_error`)
//! - `trigger_probe_outcomes_total` (counter): probes by outcome
//! - `trigger_probe_duration_seconds` (histogram): time for a full probe
//! - `trigger_activations_total` (counter): activations by `accepted`
//! - `trigger_results_total` (counter): finished choreographies by result

use std::net::SocketAddr;
use std::time::Duration;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_probe_attempt(result: &'static str) {
    metrics::counter!("trigger_probe_attempts_total", "result" => result).increment(1);
}

pub fn record_probe_outcome(outcome: &'static str, elapsed: Duration) {
    metrics::counter!("trigger_probe_outcomes_total", "outcome" => outcome).increment(1);
    metrics::histogram!("trigger_probe_duration_seconds").record(elapsed.as_secs_f64());
}

pub fn record_activation(accepted: bool) {
    let accepted = if accepted { "true" } else { "false" };
    metrics::counter!("trigger_activations_total", "accepted" => accepted).increment(1);
}

pub fn record_trigger_result(result: &'static str) {
    metrics::counter!("trigger_results_total", "result" => result).increment(1);
}
