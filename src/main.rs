//! influence-marketplace server entry point.
//!
//! Starts the Axum HTTP server with REST and WebSocket endpoints.

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use influence_marketplace::api;
use influence_marketplace::app_state::AppState;
use influence_marketplace::config::{LogFormat, MarketplaceConfig};
use influence_marketplace::domain::EventBus;
use influence_marketplace::persistence::{MemoryStore, PostgresStore, Store};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = MarketplaceConfig::from_env().context("invalid configuration")?;
    init_tracing(config.log_format);

    tracing::info!(addr = %config.listen_addr, "starting influence-marketplace");

    let store = open_store(&config).await?;
    tracing::info!(storage = store.backend_name(), "store ready");

    let event_bus = EventBus::new(config.event_bus_capacity);
    let app = api::build_app(AppState::new(store, event_bus), &config);

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

async fn open_store(config: &MarketplaceConfig) -> anyhow::Result<Store> {
    if !config.persistence_enabled {
        tracing::warn!("persistence disabled, data lives in memory only");
        return Ok(Store::Memory(MemoryStore::new()));
    }

    let store = PostgresStore::connect(config)
        .await
        .context("failed to connect to PostgreSQL")?;
    if config.run_migrations {
        store.migrate().await.context("failed to run migrations")?;
        tracing::info!("migrations applied");
    }
    Ok(Store::Postgres(store))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
