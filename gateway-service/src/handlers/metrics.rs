use axum::extract::State;
use axum::response::IntoResponse;
use metrics_exporter_prometheus::PrometheusHandle;

pub async fn metrics(State(handle): State<PrometheusHandle>) -> impl IntoResponse {
    handle.render()
}
