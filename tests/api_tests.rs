use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use boardgame_recommender::{
    api::{create_router, AppState},
    db::InMemoryStore,
    models::{BoardGame, MetricVector},
};

fn catalog() -> Vec<BoardGame> {
    vec![
        BoardGame::new("Brass", MetricVector::from_components([2, 5, 1, 2, 2, 1, 3, 3, 5, 1])),
        BoardGame::new("Codenames", MetricVector::from_components([2, 2, 5, 1, 1, 2, 2, 3, 1, 5])),
        BoardGame::new("Gloomhaven", MetricVector::from_components([4, 4, 1, 5, 5, 3, 4, 1, 3, 5])),
        BoardGame::new("Coup", MetricVector::from_components([1, 2, 5, 1, 1, 3, 5, 5, 1, 1])),
        BoardGame::new(
            "Terraforming Mars",
            MetricVector::from_components([4, 4, 2, 3, 3, 2, 2, 1, 5, 1]),
        ),
    ]
}

fn create_test_server(games: Vec<BoardGame>) -> TestServer {
    let store = Arc::new(InMemoryStore::with_games(games));
    let app = create_router(AppState::in_memory(store, 3));
    TestServer::new(app).unwrap()
}

async fn register(server: &TestServer, username: &str) -> String {
    let response = server
        .post("/users")
        .json(&json!({ "username": username, "password": "s3cret" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let user: Value = response.json();
    user["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server(vec![]);
    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = create_test_server(vec![]);
    let id = "0b6f8f3c-6e0e-4d8b-9a9e-2f1d3c4b5a69";
    let response = server
        .get("/health")
        .add_header(
            axum::http::HeaderName::from_static("x-request-id"),
            axum::http::HeaderValue::from_static(id),
        )
        .await;
    assert_eq!(response.header("x-request-id"), id);
}

#[tokio::test]
async fn test_list_and_get_games() {
    let games = catalog();
    let first_id = games[0].id.to_string();
    let server = create_test_server(games);

    let response = server.get("/games").await;
    response.assert_status_ok();
    let listed: Vec<Value> = response.json();
    assert_eq!(listed.len(), 5);
    assert_eq!(listed[0]["name"], "Brass");

    let response = server.get(&format!("/games/{}", first_id)).await;
    response.assert_status_ok();
    let game: Value = response.json();
    assert_eq!(game["metrics"]["internal"]["challenge"], 5);

    let response = server
        .get(&format!("/games/{}", uuid::Uuid::new_v4()))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_user_and_fetch_without_password() {
    let server = create_test_server(vec![]);
    let id = register(&server, "meeple").await;

    let response = server.get(&format!("/users/{}", id)).await;
    response.assert_status_ok();
    let user: Value = response.json();
    assert_eq!(user["username"], "meeple");
    assert_eq!(user["metrics"]["internal"]["aesthetic"], 3);
    assert_eq!(user["games"]["liked"], json!([]));
    assert!(user.get("password").is_none());
    assert!(user.get("password_hash").is_none());
}

#[tokio::test]
async fn test_create_user_rejects_markup_and_duplicates() {
    let server = create_test_server(vec![]);

    let response = server
        .post("/users")
        .json(&json!({ "username": "<script>", "password": "pw" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    register(&server, "meeple").await;
    let response = server
        .post("/users")
        .json(&json!({ "username": "meeple", "password": "other" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login() {
    let server = create_test_server(vec![]);
    let id = register(&server, "meeple").await;

    let response = server
        .post("/sessions")
        .json(&json!({ "username": "meeple", "password": "s3cret" }))
        .await;
    response.assert_status_ok();
    let user: Value = response.json();
    assert_eq!(user["id"], id.as_str());

    let response = server
        .post("/sessions")
        .json(&json!({ "username": "meeple", "password": "wrong" }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["error"], "Invalid username or password");
}

#[tokio::test]
async fn test_get_unknown_user() {
    let server = create_test_server(vec![]);
    let response = server
        .get(&format!("/users/{}", uuid::Uuid::new_v4()))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_games_rejects_non_arrays() {
    let server = create_test_server(catalog());
    let id = register(&server, "meeple").await;

    let response = server
        .put(&format!("/users/{}/games", id))
        .json(&json!({ "liked": "Coup", "disliked": [] }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    // The profile is untouched
    let user: Value = server.get(&format!("/users/{}", id)).await.json();
    assert_eq!(user["metrics"]["internal"]["aesthetic"], 3);
}

#[tokio::test]
async fn test_update_games_with_empty_lists() {
    let server = create_test_server(catalog());
    let id = register(&server, "meeple").await;

    let response = server
        .put(&format!("/users/{}/games", id))
        .json(&json!({ "liked": [], "disliked": [] }))
        .await;
    response.assert_status_ok();

    let user: Value = response.json();
    assert_eq!(user["metrics"]["internal"]["aesthetic"], 5);
    assert_eq!(user["metrics"]["external"]["teamwork"], 5);
    assert_eq!(user["metrics"]["len"], 250f64.sqrt());
}

#[tokio::test]
async fn test_rated_games_drive_recommendations() {
    let games = catalog();
    let coup = games[3].id.to_string();
    let gloomhaven = games[2].id.to_string();
    let server = create_test_server(games);
    let id = register(&server, "meeple").await;

    let response = server
        .put(&format!("/users/{}/games", id))
        .json(&json!({
            "liked": [coup, uuid::Uuid::new_v4().to_string()],
            "disliked": [gloomhaven]
        }))
        .await;
    response.assert_status_ok();

    let user: Value = response.json();
    assert_eq!(user["games"]["liked"].as_array().unwrap().len(), 2);
    for group in ["internal", "external"] {
        for (_, value) in user["metrics"][group].as_object().unwrap() {
            let v = value.as_i64().unwrap();
            assert!((1..=5).contains(&v));
        }
    }

    let stored: Value = server.get(&format!("/users/{}", id)).await.json();
    assert_eq!(stored["metrics"], user["metrics"]);

    // Default limit from state
    let response = server
        .get(&format!("/users/{}/recommendations", id))
        .await;
    response.assert_status_ok();
    let ranked: Vec<Value> = response.json();
    assert_eq!(ranked.len(), 3);
    assert_eq!(ranked[0]["name"], "Coup");
    let scores: Vec<f64> = ranked
        .iter()
        .map(|g| g["similarity"].as_f64().unwrap())
        .collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn test_recommendation_limit() {
    let server = create_test_server(catalog());
    let id = register(&server, "meeple").await;

    let ranked: Vec<Value> = server
        .get(&format!("/users/{}/recommendations?limit=1", id))
        .await
        .json();
    assert_eq!(ranked.len(), 1);

    let ranked: Vec<Value> = server
        .get(&format!("/users/{}/recommendations?limit=50", id))
        .await
        .json();
    assert_eq!(ranked.len(), 5);
}

#[tokio::test]
async fn test_recommendations_with_degenerate_game() {
    let mut games = catalog();
    games.push(BoardGame::new("Blank", MetricVector::uniform(0)));
    let server = create_test_server(games);
    let id = register(&server, "meeple").await;

    let response = server
        .get(&format!("/users/{}/recommendations", id))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_recommendations_for_unknown_user() {
    let server = create_test_server(catalog());
    let response = server
        .get(&format!("/users/{}/recommendations", uuid::Uuid::new_v4()))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}
