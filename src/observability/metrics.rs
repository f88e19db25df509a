//! Metrics collection and exposition.
//!
//! # Metrics
//! - `noaas_requests_total` (counter): handled requests by status, format
//! - `noaas_request_duration_seconds` (histogram): handler latency
//! - `noaas_rate_limited_total` (counter): requests answered with 429
//! - `noaas_rate_limiter_visitors` (gauge): clients remembered after a sweep
//!
//! Recording without an installed exporter is a no-op, so tests and
//! metrics-disabled deployments pay almost nothing.

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus exporter with its own HTTP listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_request(status: u16, format: &'static str, start: Instant) {
    counter!(
        "noaas_requests_total",
        "status" => status.to_string(),
        "format" => format
    )
    .increment(1);
    histogram!("noaas_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_rate_limited() {
    counter!("noaas_rate_limited_total").increment(1);
}

pub fn record_visitors(count: usize) {
    gauge!("noaas_rate_limiter_visitors").set(count as f64);
}
