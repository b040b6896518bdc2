//! Binary crate for the `weathernow-gateway` server.

use anyhow::Context;
use tracing::info;
use weathernow_gateway::{AppState, GatewayConfig, logging::configure_logging, router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the environment may already carry the keys.
    dotenv::dotenv().ok();

    let config = GatewayConfig::from_env()?;
    configure_logging(config.log_format)?;
    let addr = config.socket_addr()?;
    info!(?config, "starting gateway");

    let app = router(AppState::from_config(&config)?);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server running on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Gateway server error")?;

    info!("Gateway shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
