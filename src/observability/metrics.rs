//! Metrics collection.
//!
//! # Metrics
//! - `docroute_requests_total` (counter): requests by route, status
//! - `docroute_request_duration_seconds` (histogram): latency by route
//! - `docroute_routes_loaded` (gauge): routes in the registry after discovery
//!
//! # Design Decisions
//! - Unmatched requests are labelled `route="none"` to bound cardinality

use std::time::Instant;

/// Record a finished request.
pub fn record_request(route: &str, status: u16, start: Instant) {
    let status = status.to_string();
    metrics::counter!(
        "docroute_requests_total",
        "route" => route.to_string(),
        "status" => status
    )
    .increment(1);
    metrics::histogram!(
        "docroute_request_duration_seconds",
        "route" => route.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record the registry size after a discovery pass.
pub fn record_routes_loaded(count: usize) {
    metrics::gauge!("docroute_routes_loaded").set(count as f64);
}
