// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::application::dashboard::Dashboard;
use crate::infrastructure::config::load_dashboard_config;
use crate::infrastructure::energy_api_client::EnergyApiClient;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = load_dashboard_config()?;

    // Create the data source (infrastructure layer)
    let client = Arc::new(EnergyApiClient::new(&config.service)?);

    // Create panel controllers (application layer)
    let dashboard = Dashboard::new(client, config.cities.clone());

    let state = Arc::new(AppState { dashboard });

    // Build router (presentation layer)
    let router = router(state);

    // Start server
    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address '{}'", config.server.bind))?;
    tracing::info!(
        "Starting energy-dashboard on {} (data service {})",
        addr,
        config.service.base_url
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
