// src/handlers/trivias.rs

use std::collections::{HashMap, HashSet};

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use validator::Validate;

use crate::{
    error::AppError,
    extractors::AppJson,
    models::trivia::{CreateTriviaRequest, Membership, Trivia, TriviaResponse, dedup_ids},
};

/// Creates a trivia and assigns its questions and participants.
///
/// * Every referenced question and user must exist.
/// * The trivia row and both join tables are written in one transaction.
pub async fn create_trivia(
    State(pool): State<SqlitePool>,
    AppJson(payload): AppJson<CreateTriviaRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let question_ids = dedup_ids(&payload.question_ids);
    let mut user_ids = dedup_ids(&payload.user_ids);
    user_ids.sort_unstable();

    let missing_questions = missing_ids(&pool, "questions", &question_ids).await?;
    if !missing_questions.is_empty() {
        return Err(AppError::BadRequest(format!(
            "Questions not found: {}",
            join_ids(&missing_questions)
        )));
    }

    let missing_users = missing_ids(&pool, "users", &user_ids).await?;
    if !missing_users.is_empty() {
        return Err(AppError::BadRequest(format!(
            "Users not found: {}",
            join_ids(&missing_users)
        )));
    }

    let mut tx = pool.begin().await?;

    let trivia = sqlx::query_as::<_, Trivia>(
        r#"
        INSERT INTO trivias (name, description)
        VALUES (?1, ?2)
        RETURNING id, name, description, created_at
        "#,
    )
    .bind(payload.name.trim())
    .bind(payload.description.as_deref())
    .fetch_one(&mut *tx)
    .await?;

    let mut qb = QueryBuilder::<Sqlite>::new(
        "INSERT INTO trivia_questions (trivia_id, question_id, position) ",
    );
    qb.push_values(question_ids.iter().enumerate(), |mut b, (pos, id)| {
        b.push_bind(trivia.id).push_bind(*id).push_bind(pos as i64);
    });
    qb.build().execute(&mut *tx).await?;

    let mut qb = QueryBuilder::<Sqlite>::new("INSERT INTO trivia_users (trivia_id, user_id) ");
    qb.push_values(user_ids.iter(), |mut b, id| {
        b.push_bind(trivia.id).push_bind(*id);
    });
    qb.build().execute(&mut *tx).await?;

    tx.commit().await?;

    tracing::info!(
        "Trivia {} created with {} questions and {} participants",
        trivia.id,
        question_ids.len(),
        user_ids.len()
    );

    Ok((
        StatusCode::CREATED,
        Json(TriviaResponse::new(trivia, question_ids, user_ids)),
    ))
}

/// Lists all trivias with their question and participant ids.
pub async fn list_trivias(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let trivias = sqlx::query_as::<_, Trivia>(
        "SELECT id, name, description, created_at FROM trivias ORDER BY id",
    )
    .fetch_all(&pool)
    .await?;

    let mut questions = group_members(
        sqlx::query_as::<_, Membership>(
            r#"
            SELECT trivia_id, question_id AS member_id
            FROM trivia_questions
            ORDER BY trivia_id, position
            "#,
        )
        .fetch_all(&pool)
        .await?,
    );

    let mut users = group_members(
        sqlx::query_as::<_, Membership>(
            r#"
            SELECT trivia_id, user_id AS member_id
            FROM trivia_users
            ORDER BY trivia_id, user_id
            "#,
        )
        .fetch_all(&pool)
        .await?,
    );

    let response: Vec<TriviaResponse> = trivias
        .into_iter()
        .map(|t| {
            let question_ids = questions.remove(&t.id).unwrap_or_default();
            let user_ids = users.remove(&t.id).unwrap_or_default();
            TriviaResponse::new(t, question_ids, user_ids)
        })
        .collect();

    Ok(Json(response))
}

/// Retrieves a single trivia by ID.
pub async fn get_trivia(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let trivia = find_trivia(&pool, id).await?;

    let question_ids = sqlx::query_scalar::<_, i64>(
        "SELECT question_id FROM trivia_questions WHERE trivia_id = ?1 ORDER BY position",
    )
    .bind(id)
    .fetch_all(&pool)
    .await?;

    let user_ids = sqlx::query_scalar::<_, i64>(
        "SELECT user_id FROM trivia_users WHERE trivia_id = ?1 ORDER BY user_id",
    )
    .bind(id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(TriviaResponse::new(trivia, question_ids, user_ids)))
}

pub(crate) async fn find_trivia(pool: &SqlitePool, id: i64) -> Result<Trivia, AppError> {
    sqlx::query_as::<_, Trivia>(
        "SELECT id, name, description, created_at FROM trivias WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Trivia with ID {} not found", id)))
}

/// Returns the ids from `ids` that have no row in `table`, in request order.
async fn missing_ids(
    pool: &SqlitePool,
    table: &'static str,
    ids: &[i64],
) -> Result<Vec<i64>, AppError> {
    let mut query_builder = QueryBuilder::<Sqlite>::new("SELECT id FROM ");
    query_builder.push(table);
    query_builder.push(" WHERE id IN (");

    let mut separated = query_builder.separated(",");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(")");

    let found: HashSet<i64> = query_builder
        .build_query_scalar::<i64>()
        .fetch_all(pool)
        .await?
        .into_iter()
        .collect();

    Ok(ids.iter().copied().filter(|id| !found.contains(id)).collect())
}

fn group_members(rows: Vec<Membership>) -> HashMap<i64, Vec<i64>> {
    let mut grouped: HashMap<i64, Vec<i64>> = HashMap::new();
    for row in rows {
        grouped.entry(row.trivia_id).or_default().push(row.member_id);
    }
    grouped
}

fn join_ids(ids: &[i64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_members_preserves_row_order() {
        let rows = vec![
            Membership { trivia_id: 1, member_id: 5 },
            Membership { trivia_id: 2, member_id: 7 },
            Membership { trivia_id: 1, member_id: 3 },
        ];
        let grouped = group_members(rows);
        assert_eq!(grouped[&1], vec![5, 3]);
        assert_eq!(grouped[&2], vec![7]);
    }

    #[test]
    fn test_join_ids() {
        assert_eq!(join_ids(&[4, 8, 15]), "4, 8, 15");
        assert_eq!(join_ids(&[]), "");
    }
}
