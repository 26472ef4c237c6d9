pub mod board_game;
pub mod metrics;
pub mod user;

pub use board_game::{BoardGame, GameId, ScoredGame};
pub use metrics::{ExternalMetrics, InternalMetrics, MetricVector};
pub use user::{GameLists, NewUser, User, UserCredentials};
