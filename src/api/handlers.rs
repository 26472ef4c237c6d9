use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{BoardGame, GameLists, NewUser, ScoredGame, User},
    services::{accounts, metrics, recommendations},
};

use super::AppState;

// Request types

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub limit: Option<usize>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Lists the whole catalog
pub async fn list_games(State(state): State<AppState>) -> AppResult<Json<Vec<BoardGame>>> {
    let games = state.catalog.find_all().await?;
    Ok(Json(games))
}

/// Fetches one catalog game
pub async fn get_game(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BoardGame>> {
    state
        .catalog
        .find_by_ids(&[id])
        .await?
        .into_iter()
        .next()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Game {}", id)))
}

/// Registers a new account
pub async fn create_user(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<NewUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    tracing::info!(request_id = %request_id, username = %request.username, "Creating user");

    let user = accounts::create_user(state.users.as_ref(), request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Checks a username/password pair
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<User>> {
    let user = accounts::authenticate(state.users.as_ref(), &request.username, &request.password)
        .await?;
    Ok(Json(user))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<User>> {
    let user = accounts::get_user(state.users.as_ref(), id).await?;
    Ok(Json(user))
}

/// Replaces the user's liked/disliked games and recomputes the taste vector
///
/// The body is taken untyped so that non-array lists surface as invalid input.
pub async fn update_games(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(id): Path<Uuid>,
    Json(body): Json<Value>,
) -> AppResult<Json<User>> {
    let games = GameLists::from_json(&body)?;

    tracing::info!(
        request_id = %request_id,
        user_id = %id,
        liked_count = games.liked.len(),
        disliked_count = games.disliked.len(),
        "Updating rated games"
    );

    let user = metrics::set_metrics_from_games(
        state.catalog.as_ref(),
        state.users.as_ref(),
        id,
        games,
    )
    .await?;

    Ok(Json(user))
}

/// Ranks the catalog against the user's taste vector
pub async fn get_recommendations(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(id): Path<Uuid>,
    Query(query): Query<RecommendationQuery>,
) -> AppResult<Json<Vec<ScoredGame>>> {
    let limit = query.limit.unwrap_or(state.recommendation_limit);

    tracing::info!(
        request_id = %request_id,
        user_id = %id,
        limit,
        "Processing recommendation request"
    );

    let ranked = recommendations::get_recommendations(
        state.catalog.as_ref(),
        state.users.as_ref(),
        id,
        limit,
    )
    .await?;

    Ok(Json(ranked))
}
