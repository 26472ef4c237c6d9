pub mod accounts;
pub mod metrics;
pub mod recommendations;

pub use metrics::{derive_metrics, set_metrics_from_games};
pub use recommendations::{get_recommendations, rank};
