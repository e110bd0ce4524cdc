use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ecommerce_orders::config::AppConfig;
use ecommerce_orders::domain::{EventPublisher, UnitOfWorkFactory};
use ecommerce_orders::infrastructure::{
    spawn_event_logger, BroadcastEventPublisher, InMemoryStore, PgStore,
};
use ecommerce_orders::metrics::Metrics;
use ecommerce_orders::web::{self as api, AppState};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Default to INFO, override with RUST_LOG
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,ecommerce_orders=debug")),
        )
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!(
        host = %config.http_host,
        port = config.http_port,
        persistent = config.database_url.is_some(),
        "🚀 Starting order service"
    );

    let metrics = Arc::new(Metrics::new()?);
    tracing::info!("📊 Metrics registry created with {} metrics", metrics.registry().gather().len());

    // === Storage ===
    let store: Arc<dyn UnitOfWorkFactory> = match &config.database_url {
        Some(url) => {
            let pg = PgStore::connect(url, config.db_max_connections, config.db_connect_retry.clone())
                .await
                .context("Failed to connect to PostgreSQL")?;
            pg.ensure_schema().await?;
            tracing::info!("Using PostgreSQL store");
            Arc::new(pg)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, orders are kept in memory only");
            Arc::new(InMemoryStore::new())
        }
    };

    // === Events ===
    let broadcaster = BroadcastEventPublisher::new(config.event_channel_capacity);
    let event_logger = spawn_event_logger(broadcaster.subscribe(), metrics.clone());
    let publisher: Arc<dyn EventPublisher> = Arc::new(broadcaster);

    // === HTTP ===
    let state = web::Data::new(AppState::new(store, publisher, metrics.clone()));
    let metrics_data = web::Data::new(metrics);

    tracing::info!("Listening on http://{}:{}", config.http_host, config.http_port);
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(metrics_data.clone())
            .configure(api::configure)
    })
    .bind((config.http_host.as_str(), config.http_port))
    .with_context(|| format!("Failed to bind {}:{}", config.http_host, config.http_port))?
    .run()
    .await?;

    event_logger.abort();
    tracing::info!("Order service stopped");

    Ok(())
}
