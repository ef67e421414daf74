// src/handlers/health.rs

use axum::{Json, extract::State, response::IntoResponse};
use sqlx::SqlitePool;

use crate::error::AppError;

/// Service banner.
pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "HR Trivia API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Liveness check; also confirms that the database answers.
pub async fn health_check(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Health check failed: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    Ok(Json(serde_json::json!({ "status": "ok" })))
}
