//! Cashlink Proxy binary

use anyhow::{Context, Result};
use cashlink_proxy::{config::ProxyConfig, routes, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting Cashlink proxy service");

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = ProxyConfig::from_env().context("Failed to load proxy configuration")?;

    info!(
        upstream = %config.upstream.base_url,
        token_endpoint = %config.upstream.token_endpoint,
        otp_url = %config.otp_url,
        "Initializing relay services"
    );

    // Create shared application state
    let state = AppState::from_config(&config);

    // Build HTTP router
    let app = routes::create_router(state);

    let addr = config.bind_addr();
    info!(addr = %addr, "Starting HTTP server");

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
