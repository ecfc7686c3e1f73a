//! Copion - profile stats and history server
//!
//! Main entry point for the HTTP service.

use std::sync::Arc;

use anyhow::Context as _;
use copion_api::utils::logging::init_tracing;
use copion_api::{router, AppContext};
use copion_infra::config;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before reading configuration from the environment
    let dotenv = dotenvy::dotenv();

    let config = config::load().context("failed to load configuration")?;
    init_tracing(&config.logging).context("failed to initialise logging")?;

    match dotenv {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(err) => warn!(error = %err, "no .env file loaded"),
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let ctx = Arc::new(AppContext::new_with_config(config).await);

    let listener = TcpListener::bind(&addr).await.with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "copion server listening");

    let served = axum::serve(listener, router(Arc::clone(&ctx)))
        .with_graceful_shutdown(shutdown_signal())
        .await;

    if let Err(err) = ctx.shutdown().await {
        error!(error = %err, "final save failed");
    }

    served.context("server error")?;
    info!("copion server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
