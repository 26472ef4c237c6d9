use std::{collections::HashSet, sync::Arc};

use super::{Cache, CacheKey};
use crate::{
    cached,
    db::GameCatalog,
    error::{AppError, AppResult},
    models::{BoardGame, GameId},
};

/// Read-through Redis cache in front of another catalog
///
/// The full catalog is cached as one snapshot and single games by id. Any
/// cache failure is reported as the catalog being unavailable.
pub struct CachedCatalog {
    inner: Arc<dyn GameCatalog>,
    cache: Cache,
    ttl: u64,
}

impl CachedCatalog {
    pub fn new(inner: Arc<dyn GameCatalog>, cache: Cache, ttl: u64) -> Self {
        Self { inner, cache, ttl }
    }

    async fn load_catalog(&self) -> AppResult<Vec<BoardGame>> {
        cached!(self.cache, CacheKey::Catalog, self.ttl, self.inner.find_all())
    }

    async fn load_games(&self, ids: &[GameId]) -> AppResult<Vec<BoardGame>> {
        let unique = unique_ids(ids);

        let mut found = Vec::with_capacity(unique.len());
        let mut missing = Vec::new();
        for id in unique {
            match self.cache.get_from_cache::<BoardGame>(&CacheKey::Game(id)).await? {
                Some(game) => found.push(game),
                None => missing.push(id),
            }
        }

        if !missing.is_empty() {
            tracing::debug!(
                hits = found.len(),
                misses = missing.len(),
                "Game cache lookup"
            );
            for game in self.inner.find_by_ids(&missing).await? {
                self.cache
                    .set_in_background(&CacheKey::Game(game.id), &game, self.ttl);
                found.push(game);
            }
        }

        Ok(found)
    }
}

/// Drops repeated ids, keeping the first occurrence of each in order
fn unique_ids(ids: &[GameId]) -> Vec<GameId> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

fn unavailable_on_cache_error(error: AppError) -> AppError {
    match error {
        AppError::Cache(e) => AppError::CatalogUnavailable(format!("cache: {}", e)),
        other => other,
    }
}

#[async_trait::async_trait]
impl GameCatalog for CachedCatalog {
    async fn find_by_ids(&self, ids: &[GameId]) -> AppResult<Vec<BoardGame>> {
        self.load_games(ids)
            .await
            .map_err(unavailable_on_cache_error)
    }

    async fn find_all(&self) -> AppResult<Vec<BoardGame>> {
        self.load_catalog()
            .await
            .map_err(unavailable_on_cache_error)
    }
}
