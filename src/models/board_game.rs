use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::MetricVector;

/// Identifier of a catalog board game
pub type GameId = Uuid;

/// A board game as returned by the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardGame {
    pub id: GameId,
    pub name: String,
    pub metrics: MetricVector,
}

impl BoardGame {
    /// Creates a new board game with a fresh id
    pub fn new(name: impl Into<String>, metrics: MetricVector) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            metrics,
        }
    }
}

/// A board game annotated with its similarity to one user's taste vector
///
/// Lives only for the duration of a single ranking request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredGame {
    #[serde(flatten)]
    pub game: BoardGame,
    pub similarity: f64,
}
