use gateway_service::config::GatewayConfig;
use gateway_service::startup::Application;
use service_core::observability::{init_metrics, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = GatewayConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        "gateway-service",
        &config.common.log_level,
        config.otlp_endpoint.as_deref(),
    )?;

    let metrics_handle = init_metrics()?;

    let app = Application::build(config, Some(metrics_handle)).await?;
    app.run_until_stopped().await?;

    Ok(())
}
