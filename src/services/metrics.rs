//! Taste vector derivation
//!
//! A user's taste vector starts at the neutral baseline. Every liked game
//! adds its full metric values and every disliked game subtracts half of its
//! values. The sum is then rescaled so its magnitude lands near that of a
//! vector of threes, rounded, and clamped into the 1-5 range.
use uuid::Uuid;

use crate::{
    db::{GameCatalog, UserStore},
    error::AppResult,
    models::{
        metrics::{magnitude, BASELINE, COMPONENT_COUNT, MAX_COMPONENT, MIN_COMPONENT},
        BoardGame, GameLists, MetricVector, User,
    },
};

/// Magnitude the raw vector is rescaled to before rounding
pub const RESCALE_TARGET: f64 = 15.0;

/// Weight of a disliked game relative to a liked one
pub const DISLIKE_WEIGHT: f64 = 0.5;

/// Folds liked and disliked games into a normalized taste vector
///
/// Empty inputs are not special-cased: the baseline runs through the same
/// rescale and clamp as any other sum.
pub fn derive_metrics(liked: &[BoardGame], disliked: &[BoardGame]) -> MetricVector {
    let mut raw = [f64::from(BASELINE); COMPONENT_COUNT];

    for game in liked {
        for (acc, value) in raw.iter_mut().zip(game.metrics.components()) {
            *acc += f64::from(value);
        }
    }
    for game in disliked {
        for (acc, value) in raw.iter_mut().zip(game.metrics.components()) {
            *acc -= f64::from(value) * DISLIKE_WEIGHT;
        }
    }

    let raw_len = magnitude(&raw);
    tracing::debug!(raw_len, "Computed raw taste magnitude");

    let normalized = raw.map(|value| rescale(value, raw_len));
    let metrics = MetricVector::from_components(normalized);

    tracing::debug!(final_len = metrics.len(), "Computed final taste magnitude");
    metrics
}

fn rescale(value: f64, raw_len: f64) -> i32 {
    // A zero-length sum has no direction; every component falls to the floor
    if raw_len == 0.0 {
        return MIN_COMPONENT;
    }
    let scaled = (value / raw_len * RESCALE_TARGET).round();
    scaled.clamp(f64::from(MIN_COMPONENT), f64::from(MAX_COMPONENT)) as i32
}

/// Recomputes a user's taste vector from the given games and stores it
///
/// The liked and disliked lookups run concurrently. The user is loaded before
/// anything is written, and the new vector and game lists go out in a single
/// replacement; a failed write leaves the previous profile untouched. Once
/// the write succeeds nothing else is read.
pub async fn set_metrics_from_games(
    catalog: &dyn GameCatalog,
    users: &dyn UserStore,
    user_id: Uuid,
    games: GameLists,
) -> AppResult<User> {
    let (liked, disliked) = tokio::try_join!(
        catalog.find_by_ids(&games.liked),
        catalog.find_by_ids(&games.disliked)
    )?;

    tracing::info!(
        user_id = %user_id,
        liked_requested = games.liked.len(),
        liked_found = liked.len(),
        disliked_requested = games.disliked.len(),
        disliked_found = disliked.len(),
        "Deriving taste vector"
    );

    let mut user = users.get_by_id(user_id).await?;
    let metrics = derive_metrics(&liked, &disliked);

    users
        .replace_metrics_and_games(user_id, &metrics, &games)
        .await?;

    user.metrics = metrics;
    user.games = games;

    Ok(user)
}
