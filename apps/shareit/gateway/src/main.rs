use axum_helpers::server::{create_production_app, health_router, with_common_layers};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

mod client;
mod config;
mod error;
mod handlers;
mod models;

use client::ServerClient;
use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let server = ServerClient::new(&config.upstream)
        .map_err(|e| eyre::eyre!("Failed to build HTTP client: {}", e))?;
    info!(upstream = %server.base_url(), "Forwarding to ShareIt server");

    let router = handlers::routes(server).merge(health_router(config.app));
    let app = with_common_layers(router)?;

    info!("Starting {} v{}", config.app.name, config.app.version);

    create_production_app(app, &config.server, Duration::from_secs(10), async {
        info!("Gateway has no connections to close");
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("ShareIt gateway shutdown complete");
    Ok(())
}
