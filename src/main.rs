mod config;
mod cors;
mod error;
mod handlers;
mod routes;
mod state;
mod translate;

use std::net::SocketAddr;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::{Config, DEFAULT_MODE};
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; the environment may already be set.
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("translate_relay=debug,tower_http=debug")),
        )
        .init();

    if let Ok(path) = dotenv {
        info!("Loaded environment from {}", path.display());
    }

    let mode = std::env::var("MODE")
        .ok()
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| DEFAULT_MODE.to_string());
    info!("Mode: {}", mode);

    let (config, path) = Config::load(&mode).context("failed to load configuration")?;
    info!("Loaded configuration from: {}", path.display());
    if !config.server.mode.is_empty() {
        info!("Server mode: {}", config.server.mode);
    }
    if config.deepl_api_key.trim().is_empty() {
        warn!("deepl_api_key is empty; provider calls will be rejected");
    }

    let port = config.port()?;
    let app = routes::create_routes(AppState::new(&config));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
