// src/handlers/questions.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::{SqlitePool, types::Json as SqlJson};
use validator::Validate;

use crate::{
    error::AppError,
    extractors::AppJson,
    models::question::{CreateQuestionRequest, Difficulty, Question},
};

/// Creates a new question.
///
/// * Validates text, options and difficulty.
/// * Ensures the correct option is one of the options.
pub async fn create_question(
    State(pool): State<SqlitePool>,
    AppJson(payload): AppJson<CreateQuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    payload.check_correct_option().map_err(AppError::BadRequest)?;
    let difficulty: Difficulty = payload.difficulty.parse().map_err(AppError::BadRequest)?;

    let question = sqlx::query_as::<_, Question>(
        r#"
        INSERT INTO questions (content, options, correct_option, difficulty)
        VALUES (?1, ?2, ?3, ?4)
        RETURNING id, content, options, correct_option, difficulty, created_at
        "#,
    )
    .bind(&payload.text)
    .bind(SqlJson(&payload.options))
    .bind(&payload.correct_option)
    .bind(difficulty)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create question: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    tracing::info!("Question {} created ({})", question.id, question.difficulty);

    Ok((StatusCode::CREATED, Json(question)))
}

/// Lists all questions, including their correct option and difficulty.
pub async fn list_questions(
    State(pool): State<SqlitePool>,
) -> Result<impl IntoResponse, AppError> {
    let questions = sqlx::query_as::<_, Question>(
        r#"
        SELECT id, content, options, correct_option, difficulty, created_at
        FROM questions
        ORDER BY id
        "#,
    )
    .fetch_all(&pool)
    .await?;

    Ok(Json(questions))
}

/// Retrieves a single question by ID.
pub async fn get_question(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let question = sqlx::query_as::<_, Question>(
        r#"
        SELECT id, content, options, correct_option, difficulty, created_at
        FROM questions
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(&pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Question with ID {} not found", id)))?;

    Ok(Json(question))
}
