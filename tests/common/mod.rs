// tests/common/mod.rs
#![allow(dead_code)]

use std::str::FromStr;

use hr_trivia::{config::Config, db, routes, state::AppState};
use serde_json::{Value, json};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// Spawns the app on a random port, backed by a fresh in-memory database.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
pub async fn spawn_app() -> String {
    // An in-memory database lives as long as its connection, so the pool
    // is pinned to a single connection that never expires.
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("Invalid in-memory database URL")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("Failed to open in-memory database");

    db::migrate(&pool).await.expect("Failed to migrate database");

    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        database_max_connections: 1,
        host: "127.0.0.1".to_string(),
        port: 0,
        rust_log: "error".to_string(),
        log_dir: "logs".to_string(),
        cors_origins: vec!["http://localhost:3000".to_string()],
    };

    let state = AppState { pool, config };
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

pub async fn post_json(
    client: &reqwest::Client,
    url: String,
    body: Value,
) -> (u16, Value) {
    let response = client
        .post(url)
        .json(&body)
        .send()
        .await
        .expect("Failed to execute request");
    let status = response.status().as_u16();
    let body = response.json::<Value>().await.unwrap_or(Value::Null);
    (status, body)
}

pub async fn get_json(client: &reqwest::Client, url: String) -> (u16, Value) {
    let response = client
        .get(url)
        .send()
        .await
        .expect("Failed to execute request");
    let status = response.status().as_u16();
    let body = response.json::<Value>().await.unwrap_or(Value::Null);
    (status, body)
}

pub async fn create_user(client: &reqwest::Client, address: &str, name: &str, email: &str) -> i64 {
    let (status, body) = post_json(
        client,
        format!("{}/users", address),
        json!({ "name": name, "email": email }),
    )
    .await;
    assert_eq!(status, 201, "create user failed: {}", body);
    body["id"].as_i64().expect("user id missing")
}

pub async fn create_question(
    client: &reqwest::Client,
    address: &str,
    options: &[&str],
    correct_option: &str,
    difficulty: &str,
) -> i64 {
    let (status, body) = post_json(
        client,
        format!("{}/questions", address),
        json!({
            "text": format!("Pick {}", correct_option),
            "options": options,
            "correct_option": correct_option,
            "difficulty": difficulty,
        }),
    )
    .await;
    assert_eq!(status, 201, "create question failed: {}", body);
    body["id"].as_i64().expect("question id missing")
}

pub async fn create_trivia(
    client: &reqwest::Client,
    address: &str,
    question_ids: &[i64],
    user_ids: &[i64],
) -> i64 {
    let (status, body) = post_json(
        client,
        format!("{}/trivias", address),
        json!({
            "name": "HR onboarding",
            "description": "Basics every new hire should know",
            "question_ids": question_ids,
            "user_ids": user_ids,
        }),
    )
    .await;
    assert_eq!(status, 201, "create trivia failed: {}", body);
    body["id"].as_i64().expect("trivia id missing")
}

pub async fn submit_answer(
    client: &reqwest::Client,
    address: &str,
    trivia_id: i64,
    user_id: i64,
    question_id: i64,
    option: &str,
) -> (u16, Value) {
    post_json(
        client,
        format!("{}/trivias/{}/answer", address, trivia_id),
        json!({
            "user_id": user_id,
            "question_id": question_id,
            "submitted_option": option,
        }),
    )
    .await
}

pub async fn score_of(client: &reqwest::Client, address: &str, trivia_id: i64, user_id: i64) -> i64 {
    let (status, body) = get_json(
        client,
        format!("{}/trivias/{}/users/{}/score", address, trivia_id, user_id),
    )
    .await;
    assert_eq!(status, 200, "score query failed: {}", body);
    body["total_score"].as_i64().expect("total_score missing")
}
