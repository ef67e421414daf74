// src/handlers/participation.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::SqlitePool;

use crate::{
    error::{AppError, is_unique_violation},
    extractors::AppJson,
    handlers::{trivias::find_trivia, users::find_user},
    models::{
        answer::{
            Answer, ParticipantScore, RankingResponse, ScoreResponse, ScoreSummary,
            SubmitAnswerRequest, SubmitAnswerResponse,
        },
        question::{PublicQuestion, Question},
    },
    scoring::{grade_answer, rank_participants},
};

/// Lists the questions of a trivia as seen by one of its participants.
///
/// Only id, text and options are returned; the correct option and the
/// difficulty never leave the server through this endpoint.
pub async fn participant_questions(
    State(pool): State<SqlitePool>,
    Path((trivia_id, user_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, AppError> {
    find_trivia(&pool, trivia_id).await?;
    find_user(&pool, user_id).await?;

    if !is_participant(&pool, trivia_id, user_id).await? {
        return Err(AppError::NotFound(format!(
            "User {} is not assigned to trivia {}",
            user_id, trivia_id
        )));
    }

    let questions = sqlx::query_as::<_, PublicQuestion>(
        r#"
        SELECT q.id, q.content, q.options
        FROM trivia_questions tq
        JOIN questions q ON q.id = tq.question_id
        WHERE tq.trivia_id = ?1
        ORDER BY tq.position
        "#,
    )
    .bind(trivia_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(questions))
}

/// Records a participant's answer to one question of a trivia.
///
/// * Checks, in order: trivia, question membership, participant, option.
/// * Grades the answer and stores it; the first submission is final.
/// * Reveals the aggregate result only once every question is answered.
pub async fn submit_answer(
    State(pool): State<SqlitePool>,
    Path(trivia_id): Path<i64>,
    AppJson(req): AppJson<SubmitAnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    find_trivia(&pool, trivia_id).await?;

    let question = find_trivia_question(&pool, trivia_id, req.question_id).await?;

    find_user(&pool, req.user_id).await?;
    if !is_participant(&pool, trivia_id, req.user_id).await? {
        return Err(AppError::Forbidden(format!(
            "User {} is not assigned to trivia {}",
            req.user_id, trivia_id
        )));
    }

    if !question.has_option(&req.submitted_option) {
        return Err(AppError::BadRequest(format!(
            "'{}' is not an option of question {}",
            req.submitted_option, question.id
        )));
    }

    let grade = grade_answer(&question, &req.submitted_option);

    let answer = sqlx::query_as::<_, Answer>(
        r#"
        INSERT INTO answers (trivia_id, user_id, question_id, submitted_option, is_correct, points_awarded)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        RETURNING id, trivia_id, user_id, question_id, submitted_option, is_correct, points_awarded, answered_at
        "#,
    )
    .bind(trivia_id)
    .bind(req.user_id)
    .bind(question.id)
    .bind(&req.submitted_option)
    .bind(grade.is_correct)
    .bind(grade.points)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            AppError::Conflict(format!(
                "Question {} has already been answered by user {} in trivia {}",
                question.id, req.user_id, trivia_id
            ))
        } else {
            tracing::error!("Failed to record answer: {:?}", e);
            AppError::InternalServerError(e.to_string())
        }
    })?;

    tracing::info!(
        "Answer recorded for trivia={} user={} question={}",
        trivia_id,
        req.user_id,
        question.id
    );

    let total_questions = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM trivia_questions WHERE trivia_id = ?1",
    )
    .bind(trivia_id)
    .fetch_one(&pool)
    .await?;

    let summary = score_summary(&pool, trivia_id, req.user_id).await?;
    let completed = summary.total_answers >= total_questions;

    let response = SubmitAnswerResponse {
        id: answer.id,
        trivia_id: answer.trivia_id,
        user_id: answer.user_id,
        question_id: answer.question_id,
        submitted_option: answer.submitted_option,
        answered_at: answer.answered_at,
        answered_questions: summary.total_answers,
        total_questions,
        completed,
        result: completed.then_some(summary),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Returns the total score of a participant in a trivia (0 if nothing answered).
pub async fn get_score(
    State(pool): State<SqlitePool>,
    Path((trivia_id, user_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, AppError> {
    find_trivia(&pool, trivia_id).await?;
    find_user(&pool, user_id).await?;

    if !is_participant(&pool, trivia_id, user_id).await? {
        return Err(AppError::Forbidden(format!(
            "User {} is not assigned to trivia {}",
            user_id, trivia_id
        )));
    }

    let summary = score_summary(&pool, trivia_id, user_id).await?;

    Ok(Json(ScoreResponse {
        trivia_id,
        user_id,
        summary,
    }))
}

/// Builds the leaderboard of a trivia.
/// Every participant is listed, with 0 points if they have not answered.
pub async fn get_ranking(
    State(pool): State<SqlitePool>,
    Path(trivia_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let trivia = find_trivia(&pool, trivia_id).await?;

    let scores = sqlx::query_as::<_, ParticipantScore>(
        r#"
        SELECT
            u.id AS user_id,
            u.name,
            COALESCE(SUM(a.points_awarded), 0) AS total_score
        FROM trivia_users tu
        JOIN users u ON u.id = tu.user_id
        LEFT JOIN answers a ON a.trivia_id = tu.trivia_id AND a.user_id = tu.user_id
        WHERE tu.trivia_id = ?1
        GROUP BY u.id, u.name
        "#,
    )
    .bind(trivia_id)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch ranking: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(RankingResponse {
        trivia_id: trivia.id,
        trivia_name: trivia.name,
        ranking: rank_participants(scores),
    }))
}

async fn is_participant(pool: &SqlitePool, trivia_id: i64, user_id: i64) -> Result<bool, AppError> {
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM trivia_users WHERE trivia_id = ?1 AND user_id = ?2)",
    )
    .bind(trivia_id)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

/// Loads a question, requiring it to belong to the trivia.
async fn find_trivia_question(
    pool: &SqlitePool,
    trivia_id: i64,
    question_id: i64,
) -> Result<Question, AppError> {
    let question = sqlx::query_as::<_, Question>(
        r#"
        SELECT id, content, options, correct_option, difficulty, created_at
        FROM questions
        WHERE id = ?1
        "#,
    )
    .bind(question_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Question with ID {} not found", question_id)))?;

    let in_trivia = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM trivia_questions WHERE trivia_id = ?1 AND question_id = ?2)",
    )
    .bind(trivia_id)
    .bind(question_id)
    .fetch_one(pool)
    .await?;

    if !in_trivia {
        return Err(AppError::BadRequest(format!(
            "Question {} does not belong to trivia {}",
            question_id, trivia_id
        )));
    }

    Ok(question)
}

async fn score_summary(
    pool: &SqlitePool,
    trivia_id: i64,
    user_id: i64,
) -> Result<ScoreSummary, AppError> {
    let summary = sqlx::query_as::<_, ScoreSummary>(
        r#"
        SELECT
            COALESCE(SUM(points_awarded), 0) AS total_score,
            COUNT(*) AS total_answers,
            COALESCE(SUM(CASE WHEN is_correct THEN 1 ELSE 0 END), 0) AS correct_answers
        FROM answers
        WHERE trivia_id = ?1 AND user_id = ?2
        "#,
    )
    .bind(trivia_id)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(summary)
}
