//! Metrics collection and exposition.
//!
//! # Metrics
//! - `container_config_commits_total` (counter): commits by outcome (success, rejected)
//! - `container_config_commit_duration_seconds` (histogram): time spent resolving and publishing
//! - `container_config_visible_containers` (gauge): names visible after the last commit

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder with an HTTP scrape endpoint on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a finished commit attempt.
pub fn record_commit(outcome: &'static str, started: Instant, visible: usize) {
    counter!("container_config_commits_total", "outcome" => outcome).increment(1);
    histogram!("container_config_commit_duration_seconds", "outcome" => outcome)
        .record(started.elapsed().as_secs_f64());
    gauge!("container_config_visible_containers").set(visible as f64);
}
