// src/models/answer.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'answers' table in the database.
/// One row per (trivia, user, question).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Answer {
    pub id: i64,
    pub trivia_id: i64,
    pub user_id: i64,
    pub question_id: i64,
    pub submitted_option: String,
    pub is_correct: bool,
    pub points_awarded: i64,
    pub answered_at: chrono::DateTime<chrono::Utc>,
}

/// DTO for answering one question of a trivia.
/// `submitted_option` is checked against the question's options by the handler.
#[derive(Debug, Deserialize)]
pub struct SubmitAnswerRequest {
    pub user_id: i64,
    pub question_id: i64,
    pub submitted_option: String,
}

/// Aggregated score of a user in a trivia.
#[derive(Debug, Clone, Serialize, FromRow, PartialEq, Eq)]
pub struct ScoreSummary {
    pub total_score: i64,
    pub total_answers: i64,
    pub correct_answers: i64,
}

/// Response of the score endpoint.
#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub trivia_id: i64,
    pub user_id: i64,
    #[serde(flatten)]
    pub summary: ScoreSummary,
}

/// Response of the answer endpoint.
///
/// Correctness of individual answers is never returned; `result` appears only
/// once the user has answered every question of the trivia.
#[derive(Debug, Serialize)]
pub struct SubmitAnswerResponse {
    pub id: i64,
    pub trivia_id: i64,
    pub user_id: i64,
    pub question_id: i64,
    pub submitted_option: String,
    pub answered_at: chrono::DateTime<chrono::Utc>,
    pub answered_questions: i64,
    pub total_questions: i64,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ScoreSummary>,
}

/// Per-participant total, as read from the database before ranking.
#[derive(Debug, Clone, FromRow, PartialEq, Eq)]
pub struct ParticipantScore {
    pub user_id: i64,
    pub name: String,
    pub total_score: i64,
}

/// One row of a trivia leaderboard.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RankingEntry {
    pub position: usize,
    pub user_id: i64,
    pub name: String,
    pub total_score: i64,
}

#[derive(Debug, Serialize)]
pub struct RankingResponse {
    pub trivia_id: i64,
    pub trivia_name: String,
    pub ranking: Vec<RankingEntry>,
}
