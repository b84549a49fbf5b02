//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, cache setup, generator seeding, worker
//! spawning, and the Axum server lifecycle.

use crate::application::services::{RedirectService, UrlService};
use crate::config::Config;
use crate::domain::click_worker::run_click_worker;
use crate::domain::repositories::UrlRepository;
use crate::infrastructure::cache::{CacheService, MemoryCache, RedisCache};
use crate::infrastructure::persistence::PgUrlRepository;
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::code_generator::{CodeGenerator, DEFAULT_ALPHABET};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;
use tracing::{info, warn};

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations
/// - Redis cache (or in-process MemoryCache fallback)
/// - Code generator, seeded from the store's highest identifier
/// - Background click worker
/// - Axum HTTP server with trailing-slash normalization
///
/// # Errors
///
/// Returns an error if the database connection, migrations, the seed query,
/// or the server bind fail.
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let cache: Arc<dyn CacheService> = match &config.redis_url {
        Some(redis_url) => match RedisCache::connect(redis_url, config.cache_ttl_seconds).await {
            Ok(redis) => {
                info!("Cache enabled (Redis)");
                Arc::new(redis)
            }
            Err(e) => {
                warn!("Failed to connect to Redis: {}. Using MemoryCache.", e);
                Arc::new(MemoryCache::new())
            }
        },
        None => {
            info!("Cache enabled (in-process)");
            Arc::new(MemoryCache::new())
        }
    };

    let repository: Arc<dyn UrlRepository> = Arc::new(PgUrlRepository::new(Arc::new(pool)));

    // One generator per process, seeded past everything the store has
    // already assigned.
    let hint = repository
        .next_id_hint()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read generator seed hint: {e}"))?;
    let start_seed = u64::try_from(hint).unwrap_or(0);
    let generator = Arc::new(CodeGenerator::new(
        DEFAULT_ALPHABET,
        config.short_code_length,
        start_seed,
    ));
    info!(start_seed, "Code generator seeded");

    let (click_tx, click_rx) = mpsc::channel(config.click_queue_capacity);
    tokio::spawn(run_click_worker(click_rx, repository.clone()));
    info!("Click worker started");

    let urls = Arc::new(UrlService::new(
        repository.clone(),
        cache.clone(),
        generator,
    ));
    let redirects = Arc::new(RedirectService::new(
        repository.clone(),
        cache.clone(),
        click_tx,
    ));

    let state = AppState::new(urls, redirects, cache, repository);

    let app = NormalizePathLayer::trim_trailing_slash().layer(app_router(state));

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
