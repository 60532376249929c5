use anyhow::{anyhow, Result};
use axum::{routing::get, Router};
use log::info;

pub const HEALTH_BODY: &str = "✅ Bot is running!";

/// Uptime-monitor endpoint. Answers regardless of the gateway connection state.
pub fn create_server() -> Router {
    Router::new().route("/", get(health_check))
}

async fn health_check() -> &'static str {
    HEALTH_BODY
}

pub async fn start_http_server(port: u16) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(&format!("0.0.0.0:{}", port))
        .await
        .map_err(|e| anyhow!("Failed to bind to port {}: {}", port, e))?;

    info!("🌍 HTTP health server ready on port {}", port);

    axum::serve(listener, create_server())
        .await
        .map_err(|e| anyhow!("HTTP server error: {}", e))?;

    Ok(())
}
