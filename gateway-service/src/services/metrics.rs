//! Provider call metrics for gateway-service.

use metrics::{counter, histogram};
use std::time::Duration;

/// Record one upstream generation call.
///
/// `status` is `"ok"` or a [`ProviderError::kind`](super::providers::ProviderError::kind).
pub fn record_provider_call(provider: &str, model: &str, status: &str, elapsed: Duration) {
    let labels = [
        ("provider", provider.to_string()),
        ("model", model.to_string()),
        ("status", status.to_string()),
    ];

    counter!("gateway_provider_calls_total", &labels).increment(1);
    histogram!(
        "gateway_provider_latency_seconds",
        "provider" => provider.to_string(),
        "model" => model.to_string()
    )
    .record(elapsed.as_secs_f64());
}
