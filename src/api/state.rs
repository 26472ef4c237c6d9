use std::sync::Arc;

use crate::db::{GameCatalog, InMemoryStore, UserStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn GameCatalog>,
    pub users: Arc<dyn UserStore>,
    /// Recommendations returned when the request names no limit
    pub recommendation_limit: usize,
}

impl AppState {
    pub fn new(
        catalog: Arc<dyn GameCatalog>,
        users: Arc<dyn UserStore>,
        recommendation_limit: usize,
    ) -> Self {
        Self {
            catalog,
            users,
            recommendation_limit,
        }
    }

    /// State backed by one in-memory store for both catalog and users
    pub fn in_memory(store: Arc<InMemoryStore>, recommendation_limit: usize) -> Self {
        Self::new(store.clone(), store, recommendation_limit)
    }
}
