// src/models/trivia.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::{config::MAX_TRIVIA_MEMBERS, models::validate_not_blank};

/// Represents the 'trivias' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Trivia {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// A trivia together with its question set (in order) and participants.
#[derive(Debug, Serialize)]
pub struct TriviaResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub question_ids: Vec<i64>,
    pub user_ids: Vec<i64>,
}

impl TriviaResponse {
    pub fn new(trivia: Trivia, question_ids: Vec<i64>, user_ids: Vec<i64>) -> Self {
        Self {
            id: trivia.id,
            name: trivia.name,
            description: trivia.description,
            created_at: trivia.created_at,
            question_ids,
            user_ids,
        }
    }
}

/// DTO for creating a trivia.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTriviaRequest {
    #[validate(length(min = 1, max = 200), custom(function = validate_not_blank))]
    pub name: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[validate(length(
        min = 1,
        max = MAX_TRIVIA_MEMBERS,
        message = "A trivia needs between 1 and 500 questions."
    ))]
    pub question_ids: Vec<i64>,
    #[validate(length(
        min = 1,
        max = MAX_TRIVIA_MEMBERS,
        message = "A trivia needs between 1 and 500 participants."
    ))]
    pub user_ids: Vec<i64>,
}

/// Row of the `trivia_questions` / `trivia_users` join tables.
#[derive(Debug, FromRow)]
pub struct Membership {
    pub trivia_id: i64,
    pub member_id: i64,
}

/// Removes repeated ids, keeping the first occurrence of each.
pub fn dedup_ids(ids: &[i64]) -> Vec<i64> {
    let mut seen = std::collections::HashSet::new();
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_ids_keeps_first_occurrence_order() {
        assert_eq!(dedup_ids(&[3, 1, 3, 2, 1]), vec![3, 1, 2]);
        assert!(dedup_ids(&[]).is_empty());
    }

    #[test]
    fn test_blank_name_and_oversized_lists_rejected() {
        let req = CreateTriviaRequest {
            name: "   ".to_string(),
            description: None,
            question_ids: vec![1],
            user_ids: vec![1],
        };
        assert!(req.validate().is_err());

        let req = CreateTriviaRequest {
            name: "Onboarding".to_string(),
            description: None,
            question_ids: (1..=(MAX_TRIVIA_MEMBERS as i64 + 1)).collect(),
            user_ids: vec![1],
        };
        assert!(req.validate().is_err());

        let req = CreateTriviaRequest {
            name: "Onboarding".to_string(),
            description: None,
            question_ids: (1..=MAX_TRIVIA_MEMBERS as i64).collect(),
            user_ids: vec![1],
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_empty_member_lists_rejected() {
        let req = CreateTriviaRequest {
            name: "Onboarding".to_string(),
            description: None,
            question_ids: vec![],
            user_ids: vec![1],
        };
        assert!(req.validate().is_err());

        let req = CreateTriviaRequest {
            name: "Onboarding".to_string(),
            description: Some("HR basics".to_string()),
            question_ids: vec![1],
            user_ids: vec![],
        };
        assert!(req.validate().is_err());
    }
}
