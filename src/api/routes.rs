use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;
use crate::middleware::{make_span_with_request_id, request_id_middleware};

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Catalog
        .route("/games", get(handlers::list_games))
        .route("/games/:id", get(handlers::get_game))
        // Accounts
        .route("/users", post(handlers::create_user))
        .route("/sessions", post(handlers::login))
        .route("/users/:id", get(handlers::get_user))
        // Taste profile and recommendations
        .route("/users/:id/games", put(handlers::update_games))
        .route("/users/:id/recommendations", get(handlers::get_recommendations))
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
