//! Metrics for backend health checks.
//!
//! Recording is a no-op until a recorder is installed by the host process.

use std::time::Duration;

use ::metrics::{counter, describe_counter, describe_histogram, histogram};
use tracing::debug;

use crate::error::ApiErrorKind;

/// Health checks counter metric name.
pub const METRIC_HEALTH_CHECKS: &str = "health_checks_total";
/// Health check latency metric name.
pub const METRIC_HEALTH_CHECK_LATENCY: &str = "health_check_latency_ms";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_counter!(
        METRIC_HEALTH_CHECKS,
        "Health checks issued, labelled by outcome"
    );
    describe_histogram!(
        METRIC_HEALTH_CHECK_LATENCY,
        "Health check round trip latency in milliseconds"
    );
    debug!("Metrics initialized");
}

/// Outcome label of a finished health check.
pub fn outcome_label(error: Option<ApiErrorKind>) -> &'static str {
    match error {
        None => "ok",
        Some(ApiErrorKind::Status) => "status",
        Some(ApiErrorKind::Network) => "network",
        Some(ApiErrorKind::Request) => "request",
    }
}

/// Record one finished health check.
pub fn record_health_check(error: Option<ApiErrorKind>, elapsed: Duration) {
    counter!(METRIC_HEALTH_CHECKS, "outcome" => outcome_label(error)).increment(1);
    histogram!(METRIC_HEALTH_CHECK_LATENCY).record(elapsed.as_secs_f64() * 1000.0);
}
