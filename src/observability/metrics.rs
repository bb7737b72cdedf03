//! Metrics collection and exposition.
//!
//! # Metrics
//! - `bridge_lookups_total` (counter): lookups by outcome (matched, fallback)
//! - `bridge_dispatch_total` (counter): dispatched requests by method, status
//! - `bridge_dispatch_duration_seconds` (histogram): dispatch latency
//! - `bridge_dispatch_failures_total` (counter): failures converted to 500
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; without an installed
//!   recorder every call is a no-op
//! - The Prometheus exporter is optional and owns its own listener

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_lookup(matched: bool) {
    let outcome = if matched { "matched" } else { "fallback" };
    metrics::counter!("bridge_lookups_total", "outcome" => outcome).increment(1);
}

pub fn record_dispatch(method: &str, status: u16, start: Instant) {
    metrics::counter!(
        "bridge_dispatch_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("bridge_dispatch_duration_seconds", "method" => method.to_string())
        .record(start.elapsed().as_secs_f64());
}

pub fn record_dispatch_failure() {
    metrics::counter!("bridge_dispatch_failures_total").increment(1);
}
