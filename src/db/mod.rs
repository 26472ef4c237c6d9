//! Storage collaborators
//!
//! The recommendation core only sees the catalog and the user store through
//! the traits below. Postgres, Redis and in-memory adapters implement them.
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{BoardGame, GameId, GameLists, MetricVector, User, UserCredentials},
};

pub mod memory;
pub mod postgres;
pub mod redis;

pub use memory::InMemoryStore;
pub use postgres::{create_pool, run_migrations, PgStore};
pub use self::redis::{create_redis_client, Cache, CacheKey, CacheWriterHandle, CachedCatalog};

/// Read access to the board game catalog
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait GameCatalog: Send + Sync {
    /// Returns the games matching `ids`
    ///
    /// Each matching game appears once even if its id is repeated. Ids with no
    /// matching game are skipped rather than treated as an error.
    async fn find_by_ids(&self, ids: &[GameId]) -> AppResult<Vec<BoardGame>>;

    /// Returns every game in stable catalog order
    async fn find_all(&self) -> AppResult<Vec<BoardGame>>;
}

/// Persistence for user accounts and taste profiles
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a new user. A taken username is reported as invalid input.
    async fn create(&self, user: &User, password_hash: &str) -> AppResult<()>;

    /// Looks up a user and its password hash by username
    async fn find_credentials(&self, username: &str) -> AppResult<Option<UserCredentials>>;

    /// Fetches a user without credentials
    async fn get_by_id(&self, id: Uuid) -> AppResult<User>;

    /// Replaces a user's taste vector and rated games in one write
    ///
    /// Either both fields change or neither does.
    async fn replace_metrics_and_games(
        &self,
        id: Uuid,
        metrics: &MetricVector,
        games: &GameLists,
    ) -> AppResult<()>;
}
