use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use super::{GameCatalog, UserStore};
use crate::{
    error::{AppError, AppResult},
    models::{BoardGame, GameId, GameLists, MetricVector, User, UserCredentials},
};

/// Process-local catalog and user store
///
/// Games keep their insertion order, which is the catalog order `find_all` reports.
#[derive(Default)]
pub struct InMemoryStore {
    games: RwLock<Vec<BoardGame>>,
    users: RwLock<HashMap<Uuid, UserCredentials>>,
}

impl InMemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose catalog holds `games`
    pub fn with_games(games: Vec<BoardGame>) -> Self {
        Self {
            games: RwLock::new(games),
            users: RwLock::new(HashMap::new()),
        }
    }

    /// Appends a game to the catalog
    pub async fn add_game(&self, game: BoardGame) {
        self.games.write().await.push(game);
    }
}

#[async_trait::async_trait]
impl GameCatalog for InMemoryStore {
    async fn find_by_ids(&self, ids: &[GameId]) -> AppResult<Vec<BoardGame>> {
        let games = self.games.read().await;
        Ok(games
            .iter()
            .filter(|game| ids.contains(&game.id))
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> AppResult<Vec<BoardGame>> {
        Ok(self.games.read().await.clone())
    }
}

#[async_trait::async_trait]
impl UserStore for InMemoryStore {
    async fn create(&self, user: &User, password_hash: &str) -> AppResult<()> {
        let mut users = self.users.write().await;

        if users.values().any(|c| c.user.username == user.username) {
            return Err(AppError::InvalidInput(format!(
                "Username '{}' is already taken",
                user.username
            )));
        }

        users.insert(
            user.id,
            UserCredentials {
                user: user.clone(),
                password_hash: password_hash.to_string(),
            },
        );
        Ok(())
    }

    async fn find_credentials(&self, username: &str) -> AppResult<Option<UserCredentials>> {
        let users = self.users.read().await;
        Ok(users.values().find(|c| c.user.username == username).cloned())
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<User> {
        let users = self.users.read().await;
        users
            .get(&id)
            .map(|c| c.user.clone())
            .ok_or_else(|| AppError::NotFound(format!("User {}", id)))
    }

    async fn replace_metrics_and_games(
        &self,
        id: Uuid,
        metrics: &MetricVector,
        games: &GameLists,
    ) -> AppResult<()> {
        let mut users = self.users.write().await;
        let stored = users
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("User {}", id)))?;

        stored.user.metrics = *metrics;
        stored.user.games = games.clone();
        Ok(())
    }
}
