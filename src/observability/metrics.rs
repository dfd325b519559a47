//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): inbound requests by route, status
//! - `gateway_request_duration_seconds` (histogram): latency by route
//! - `gateway_upstream_attempts_total` (counter): pool attempts by instance, outcome
//! - `gateway_probes_total` (counter): liveness probes by instance, outcome

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one completed inbound request.
pub fn record_request(route: &str, status: u16, start: Instant) {
    metrics::counter!(
        "gateway_requests_total",
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "gateway_request_duration_seconds",
        "route" => route.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record one upstream attempt against a pool instance.
pub fn record_attempt(instance: &str, success: bool) {
    metrics::counter!(
        "gateway_upstream_attempts_total",
        "instance" => instance.to_string(),
        "outcome" => if success { "success" } else { "failure" }
    )
    .increment(1);
}

/// Record one liveness probe.
pub fn record_probe(instance: &str, reachable: bool) {
    metrics::counter!(
        "gateway_probes_total",
        "instance" => instance.to_string(),
        "outcome" => if reachable { "reachable" } else { "unreachable" }
    )
    .increment(1);
}
