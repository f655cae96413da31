use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// State for health check endpoints.
#[derive(Clone)]
pub struct HealthState {
    pub credential_configured: bool,
}

/// Health check endpoint for Docker/K8s liveness probes.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "gateway-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness check endpoint: not ready until a credential is configured,
/// since every generation request would fail without one.
pub async fn readiness_check(State(state): State<HealthState>) -> impl IntoResponse {
    if state.credential_configured {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}
