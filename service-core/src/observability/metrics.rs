//! Prometheus recorder for the `metrics` facade.

use crate::error::AppError;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the process-wide Prometheus recorder.
///
/// Call once at startup; the returned handle renders the scrape output.
/// Without a recorder every `counter!`/`histogram!` call is a no-op, which is
/// what tests rely on.
pub fn init_metrics() -> Result<PrometheusHandle, AppError> {
    PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| AppError::TelemetryError(format!("Failed to install Prometheus recorder: {}", e)))
}
