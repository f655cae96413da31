//! Application startup and lifecycle management.

use crate::config::GatewayConfig;
use crate::handlers::{
    generate, health_check, metrics::metrics as metrics_handler, readiness_check, GenerateState,
    HealthState,
};
use crate::prompt::{Passthrough, Templated};
use crate::services::providers::gemini::GeminiTextProvider;
use crate::services::TextProvider;
use axum::{
    middleware::from_fn,
    routing::{any, get},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use service_core::error::AppError;
use service_core::middleware::{
    cors::allow_any_origin,
    metrics::metrics_middleware,
    tracing::{make_request_span, request_id_middleware},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Build the full HTTP router.
///
/// `/metrics` is only mounted when a recorder handle is supplied.
pub fn build_router(
    config: &GatewayConfig,
    provider: Arc<dyn TextProvider>,
    metrics_handle: Option<PrometheusHandle>,
) -> Router {
    let credential = config.google.api_key.clone();

    let ask = Router::new()
        .route("/api/ask", any(generate::<Passthrough>))
        .with_state(GenerateState::new(
            Passthrough::new(config.models.ask_model.clone()),
            provider.clone(),
            credential.clone(),
        ));

    let consult = Router::new()
        .route("/api/consult", any(generate::<Templated>))
        .with_state(GenerateState::new(
            Templated::new(config.models.consult_model.clone()),
            provider,
            credential,
        ));

    let health = Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .with_state(HealthState {
            credential_configured: config.has_credential(),
        });

    let mut router = Router::new().merge(ask).merge(consult).merge(health);

    if let Some(handle) = metrics_handle {
        let metrics_router = Router::new()
            .route("/metrics", get(metrics_handler))
            .with_state(handle);
        router = router.merge(metrics_router);
    }

    router
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(from_fn(request_id_middleware))
        .layer(allow_any_origin())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Application container for managing server lifecycle.
pub struct Application {
    http_port: u16,
    http_listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application against the real Gemini API.
    pub async fn build(
        config: GatewayConfig,
        metrics_handle: Option<PrometheusHandle>,
    ) -> Result<Self, AppError> {
        let provider: Arc<dyn TextProvider> =
            Arc::new(GeminiTextProvider::new(config.google.api_base.clone()));

        tracing::info!(
            ask_model = %config.models.ask_model,
            consult_model = %config.models.consult_model,
            api_base = %config.google.api_base,
            "Initialized Gemini text provider"
        );

        Self::build_with_provider(config, provider, metrics_handle).await
    }

    /// Build the application with an explicit provider (used by tests).
    pub async fn build_with_provider(
        config: GatewayConfig,
        provider: Arc<dyn TextProvider>,
        metrics_handle: Option<PrometheusHandle>,
    ) -> Result<Self, AppError> {
        if !config.has_credential() {
            tracing::warn!("GEMINI_API_KEY is not set; generation requests will fail until it is");
        }

        let router = build_router(&config, provider, metrics_handle);

        // Port 0 picks a random port for testing
        let http_addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let http_listener = TcpListener::bind(http_addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", http_addr, e);
            AppError::from(e)
        })?;
        let http_port = http_listener.local_addr()?.port();

        tracing::info!("Gateway service: HTTP on port {}", http_port);

        Ok(Self {
            http_port,
            http_listener,
            router,
        })
    }

    /// Get the HTTP port the server is listening on.
    pub fn http_port(&self) -> u16 {
        self.http_port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.http_listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })
    }
}
