use uuid::Uuid;

use crate::{
    db::{GameCatalog, UserStore},
    error::{AppError, AppResult},
    models::{BoardGame, MetricVector, ScoredGame},
};

/// Cosine similarity between a taste vector and a game's metrics
///
/// Fails when either vector has zero magnitude instead of producing NaN.
pub fn similarity(user: &MetricVector, game: &BoardGame) -> AppResult<f64> {
    if user.len() == 0.0 {
        return Err(AppError::DegenerateVector(
            "user taste vector has zero magnitude".to_string(),
        ));
    }
    if game.metrics.len() == 0.0 {
        return Err(AppError::DegenerateVector(format!(
            "game '{}' ({}) has zero magnitude",
            game.name, game.id
        )));
    }

    Ok(user.dot(&game.metrics) as f64 / user.len() / game.metrics.len())
}

/// Scores a catalog snapshot against a taste vector and returns the best `top_n`
///
/// Games are sorted ascending by score with a stable sort, the last `top_n`
/// are taken and reversed. Among equal scores, the game that appears later
/// in the snapshot therefore ranks first. Asking for more games than the
/// snapshot holds returns all of them.
pub fn rank(
    user_vector: &MetricVector,
    games: Vec<BoardGame>,
    top_n: usize,
) -> AppResult<Vec<ScoredGame>> {
    let mut scored = games
        .into_iter()
        .map(|game| {
            let similarity = similarity(user_vector, &game)?;
            Ok(ScoredGame { game, similarity })
        })
        .collect::<AppResult<Vec<_>>>()?;

    scored.sort_by(|a, b| a.similarity.total_cmp(&b.similarity));

    let start = scored.len().saturating_sub(top_n);
    let mut top = scored.split_off(start);
    top.reverse();

    Ok(top)
}

/// Ranks the whole catalog for a stored user
pub async fn get_recommendations(
    catalog: &dyn GameCatalog,
    users: &dyn UserStore,
    user_id: Uuid,
    top_n: usize,
) -> AppResult<Vec<ScoredGame>> {
    let user = users.get_by_id(user_id).await?;
    let games = catalog.find_all().await?;
    let catalog_size = games.len();

    let recommendations = rank(&user.metrics, games, top_n)?;

    tracing::info!(
        user_id = %user_id,
        catalog_size,
        requested = top_n,
        returned = recommendations.len(),
        "Ranked recommendations"
    );

    Ok(recommendations)
}
