//! Prometheus request metrics, compiled in with the `metrics` feature.

use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};

/// Path serving the Prometheus text exposition.
pub(crate) const METRICS_PATH: &str = "/metrics";

/// Build the request metrics middleware under the `activity_service`
/// namespace.
///
/// # Errors
///
/// Returns an error when the collectors cannot be registered.
pub(crate) fn build_metrics() -> std::io::Result<PrometheusMetrics> {
    PrometheusMetricsBuilder::new("activity_service")
        .endpoint(METRICS_PATH)
        .build()
        .map_err(|err| std::io::Error::other(format!("metrics registration failed: {err}")))
}
