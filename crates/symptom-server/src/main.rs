mod app;
mod error;
mod handlers;
mod services;
mod state;

use std::env;
use std::sync::Arc;

use anyhow::Result;
use symptom_core::UpstreamConfig;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use state::AppState;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .compact()
        .init();

    let config = UpstreamConfig::from_env();
    match &config {
        Ok(c) => info!("Relaying to {}", c.api_url),
        Err(e) => warn!("Relay disabled, every chat request will fail: {}", e),
    }

    let state = Arc::new(AppState::new(config));
    let app = app::router(state);

    let addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
