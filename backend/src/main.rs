//! Merchant Inventory Service - Backend Server
//!
//! HTTP service for material stock tracking, purchase-order receiving, and
//! recipe-driven order consumption.

use std::{net::SocketAddr, sync::Arc};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use merchant_inventory_backend::{
    config::Config, create_app, external::recipe::HttpRecipeResolver, store::MemoryStore, AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "merchant_inventory_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Merchant Inventory Server");
    tracing::info!("Environment: {}", config.environment);

    if config.recipe.base_url.is_none() {
        tracing::warn!("No recipe service base URL configured; all recipes will be unresolvable");
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    // Assemble application state
    let state = AppState {
        store: Arc::new(MemoryStore::new()),
        resolver: Arc::new(HttpRecipeResolver::new(&config.recipe)),
        config: Arc::new(config),
    };

    // Build application
    let app = create_app(state);
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
