//! Metrics collection and exposition.
//!
//! # Metrics
//! - `router_resolutions_total` (counter): lookups by route, outcome
//! - `router_resolution_duration_seconds` (histogram): lookup latency
//! - `router_navigations_total` (counter): navigations by outcome
//! - `router_table_reloads_total` (counter): config reloads by outcome
//!
//! Without an installed recorder every call here is a no-op.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Start the Prometheus scrape endpoint. Needs a running Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_resolution(route: &str, matched: bool, start: Instant) {
    let outcome = if matched { "matched" } else { "not_found" };
    counter!("router_resolutions_total", "route" => route.to_string(), "outcome" => outcome)
        .increment(1);
    histogram!("router_resolution_duration_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_navigation(outcome: &'static str) {
    counter!("router_navigations_total", "outcome" => outcome).increment(1);
}

pub fn record_reload(ok: bool) {
    let outcome = if ok { "applied" } else { "rejected" };
    counter!("router_table_reloads_total", "outcome" => outcome).increment(1);
}
