//! Metrics collection and exposition.
//!
//! # Metrics
//! - `dispatch_resolved_total` (counter): resolved dispatches by controller, action
//! - `dispatch_declined_total` (counter): requests the dispatcher declined
//! - `dispatch_unhandled_total` (counter): resolved names with no handler
//!
//! # Design Decisions
//! - Counters only; updates are atomic increments off the hot path
//! - Exposed on a separate Prometheus scrape listener

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::dispatch::Action;

/// Install the Prometheus exporter on its own listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter started"),
        Err(e) => tracing::error!("Failed to start metrics exporter: {}", e),
    }
}

pub fn record_dispatch(controller: &str, action: Action) {
    metrics::counter!(
        "dispatch_resolved_total",
        "controller" => controller.to_string(),
        "action" => action.as_str()
    )
    .increment(1);
}

pub fn record_declined() {
    metrics::counter!("dispatch_declined_total").increment(1);
}

pub fn record_unhandled(controller: &str) {
    metrics::counter!(
        "dispatch_unhandled_total",
        "controller" => controller.to_string()
    )
    .increment(1);
}
