use axum_test::TestServer;
use sqlx::SqlitePool;

use golmok_api::api::{create_router, AppState};
use golmok_api::config::Config;
use golmok_api::db::sqlite::create_test_pool;

fn test_config(openai_api_key: Option<&str>) -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        openai_api_key: openai_api_key.map(str::to_string),
        // Unroutable; no test may reach the network
        openai_api_url: "http://127.0.0.1:9".to_string(),
        openai_model: "gpt-3.5-turbo".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
    }
}

async fn create_test_server(openai_api_key: Option<&str>) -> (TestServer, SqlitePool) {
    let pool = create_test_pool().await.unwrap();
    let state = AppState::new(pool.clone(), test_config(openai_api_key));
    let app = create_router(state);
    (TestServer::new(app).unwrap(), pool)
}

/// Adult food lover with one 5-star cafe visit; a museum competes.
async fn seed_scenario(pool: &SqlitePool) {
    sqlx::query(
        "INSERT INTO user (user_id, username, birth_date) VALUES (1, 'mina', '1990-01-01')",
    )
    .execute(pool)
    .await
    .unwrap();
    sqlx::query("INSERT INTO interest_area (user_id, interest) VALUES (1, 'food')")
        .execute(pool)
        .await
        .unwrap();
    sqlx::query(
        "INSERT INTO place (place_name, type, latitude, longitude) VALUES \
         ('Corner Cafe', 'cafe', 37.57, 126.98), \
         ('City Museum', 'museum', 37.58, 126.97)",
    )
    .execute(pool)
    .await
    .unwrap();
    sqlx::query(
        "INSERT INTO trip (trip_id, user_id, title, start_date, end_date) \
         VALUES (1, 1, 'Seoul eats', '2024-03-05', '2024-03-08')",
    )
    .execute(pool)
    .await
    .unwrap();
    sqlx::query("INSERT INTO map_pin (pin_id, trip_id, place_name) VALUES (1, 1, 'Corner Cafe')")
        .execute(pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO record (pin_id, rating, visit_date) VALUES (1, 5.0, '2024-03-06')")
        .execute(pool)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_health_check() {
    let (server, _pool) = create_test_server(None).await;
    let response = server.get("/health").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_missing_user_id_is_bad_request() {
    let (server, _pool) = create_test_server(None).await;
    let response = server.get("/api/v1/recommendations").await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_non_positive_user_id_is_bad_request() {
    let (server, _pool) = create_test_server(None).await;

    let response = server.get("/api/v1/recommendations?user_id=0").await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);

    let response = server.get("/api/v1/recommendations?user_id=-7").await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_user_is_not_found_and_persists_nothing() {
    let (server, pool) = create_test_server(None).await;
    seed_scenario(&pool).await;

    let response = server.get("/api/v1/recommendations?user_id=42").await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);

    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM recommendation WHERE user_id = 42")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_recommendation_flow_ranks_and_persists() {
    let (server, pool) = create_test_server(None).await;
    seed_scenario(&pool).await;

    let response = server.get("/api/v1/recommendations?user_id=1").await;
    response.assert_status_ok();

    let recommended: Vec<serde_json::Value> = response.json();
    assert_eq!(recommended.len(), 2);
    assert_eq!(recommended[0]["place_name"], "Corner Cafe");
    assert_eq!(recommended[0]["latitude"], 37.57);
    assert_eq!(recommended[0]["longitude"], 126.98);

    // The ranked set is persisted with contiguous 1-based ranks
    let saved = server.get("/api/v1/recommendations/1/saved").await;
    saved.assert_status_ok();
    let rows: Vec<serde_json::Value> = saved.json();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["place_name"], "Corner Cafe");
    assert_eq!(rows[0]["ranking"], 1);
    assert_eq!(rows[0]["type"], "cafe");
    assert_eq!(rows[0]["age_group"], "Adult");
    assert_eq!(rows[1]["ranking"], 2);
}

#[tokio::test]
async fn test_repeat_requests_reproduce_the_same_ranking() {
    let (server, pool) = create_test_server(None).await;
    seed_scenario(&pool).await;

    let first = server.get("/api/v1/recommendations?user_id=1").await;
    first.assert_status_ok();
    let first_saved: Vec<serde_json::Value> =
        server.get("/api/v1/recommendations/1/saved").await.json();

    let second = server.get("/api/v1/recommendations?user_id=1").await;
    second.assert_status_ok();
    let second_saved: Vec<serde_json::Value> =
        server.get("/api/v1/recommendations/1/saved").await.json();

    let strip_ids = |rows: &[serde_json::Value]| -> Vec<serde_json::Value> {
        rows.iter()
            .map(|row| {
                let mut row = row.clone();
                row.as_object_mut().unwrap().remove("recommendation_id");
                row
            })
            .collect()
    };
    assert_eq!(strip_ids(&first_saved), strip_ids(&second_saved));
}

#[tokio::test]
async fn test_saved_recommendations_empty_before_any_scoring() {
    let (server, pool) = create_test_server(None).await;
    seed_scenario(&pool).await;

    let response = server.get("/api/v1/recommendations/1/saved").await;
    response.assert_status_ok();
    let rows: Vec<serde_json::Value> = response.json();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_diary_draft_requires_configuration() {
    let (server, pool) = create_test_server(None).await;
    seed_scenario(&pool).await;

    let response = server
        .post("/api/v1/diary/draft")
        .json(&serde_json::json!({
            "trip_id": 1,
            "place_name": "Corner Cafe"
        }))
        .await;
    response.assert_status(axum::http::StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_diary_draft_unknown_trip_is_not_found() {
    let (server, pool) = create_test_server(Some("test-key")).await;
    seed_scenario(&pool).await;

    // The trip lookup fails before any call to the text service
    let response = server
        .post("/api/v1/diary/draft")
        .json(&serde_json::json!({
            "trip_id": 99,
            "place_name": "Corner Cafe"
        }))
        .await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_diary_draft_rejects_empty_place_name() {
    let (server, pool) = create_test_server(Some("test-key")).await;
    seed_scenario(&pool).await;

    let response = server
        .post("/api/v1/diary/draft")
        .json(&serde_json::json!({
            "trip_id": 1,
            "place_name": "  "
        }))
        .await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
}
