use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use boardgame_recommender::{
    api::{create_router, AppState},
    config::{Config, StorageBackend},
    db::{self, Cache, CacheWriterHandle, CachedCatalog, InMemoryStore, PgStore},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    tracing::info!(storage = ?config.storage, "Loaded configuration");

    let (state, cache_handle) = build_state(&config).await?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!(address = %config.bind_address(), "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = cache_handle {
        handle.shutdown().await;
    }

    Ok(())
}

async fn build_state(config: &Config) -> anyhow::Result<(AppState, Option<CacheWriterHandle>)> {
    match config.storage {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on exit");
            let store = Arc::new(InMemoryStore::new());
            Ok((AppState::in_memory(store, config.recommendation_limit), None))
        }
        StorageBackend::Postgres => {
            let pool = db::create_pool(&config.database_url).await?;
            db::run_migrations(&pool).await?;
            let store = Arc::new(PgStore::new(pool));

            let redis_client = db::create_redis_client(&config.redis_url)?;
            let (cache, handle) = Cache::new(redis_client).await;
            let catalog = Arc::new(CachedCatalog::new(
                store.clone(),
                cache,
                config.catalog_cache_ttl,
            ));

            let state = AppState::new(catalog, store, config.recommendation_limit);
            Ok((state, Some(handle)))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
