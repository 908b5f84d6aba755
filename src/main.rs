use anyhow::Context;
use dancehub::router::init_router;
use dancehub::state::init_app_state;
use dancehub_config::ServerConfig;
use dancehub_observability::{init_metrics, init_tracing, metrics_router};
use dotenvy::dotenv;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let state = init_app_state().context("Failed to build the backend client")?;
    let mut app = init_router(state);
    if let Some(handle) = init_metrics() {
        app = app.merge(metrics_router(handle));
        tracing::info!("Prometheus metrics available at /metrics");
    }

    let server = ServerConfig::from_env();
    let address = server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    tracing::info!(address = %address, "Server running");
    tracing::info!("Swagger UI available at http://{address}/swagger-ui");
    tracing::info!("Scalar UI available at http://{address}/scalar");
    axum::serve(listener, app).await?;
    Ok(())
}
