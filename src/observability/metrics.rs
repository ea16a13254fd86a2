//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define router metrics (resolutions, rule count, cache size, reloads)
//! - Expose Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `link_router_resolutions_total` (counter): resolutions by outcome (hit, miss)
//! - `link_router_rules` (gauge): rules in the current snapshot
//! - `link_router_pattern_cache_entries` (gauge): compiled patterns held in memory
//! - `link_router_config_reloads_total` (counter): reloads by result (ok, error)
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed, so the library
//!   never requires an exporter
//! - The exporter is installed by the binary only

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with an HTTP listener on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record the outcome of one rule resolution.
pub fn record_resolution(matched: bool) {
    let outcome = if matched { "hit" } else { "miss" };
    ::metrics::counter!("link_router_resolutions_total", "outcome" => outcome).increment(1);
}

pub fn record_rule_count(count: usize) {
    ::metrics::gauge!("link_router_rules").set(count as f64);
}

pub fn record_pattern_cache_size(size: usize) {
    ::metrics::gauge!("link_router_pattern_cache_entries").set(size as f64);
}

/// Record a configuration reload attempt.
pub fn record_config_reload(success: bool) {
    let result = if success { "ok" } else { "error" };
    ::metrics::counter!("link_router_config_reloads_total", "result" => result).increment(1);
}
