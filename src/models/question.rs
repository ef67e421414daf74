// src/models/question.rs

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::{prelude::FromRow, types::Json};
use validator::Validate;

use crate::config::{MAX_OPTION_LENGTH, MAX_QUESTION_OPTIONS, MIN_QUESTION_OPTIONS};
use crate::models::validate_not_blank;

/// Question difficulty. Stored and serialized as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Points awarded for a correct answer at this difficulty.
    pub fn points(self) -> i64 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "Difficulty must be one of: {}",
                    Difficulty::ALL.map(Difficulty::as_str).join(", ")
                )
            })
    }
}

/// Represents the 'questions' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,

    /// The text of the question.
    /// Mapped from the database column 'content'.
    #[sqlx(rename = "content")]
    pub text: String,

    /// Ordered list of options (e.g., ["a", "b", "c"]).
    /// Stored as a JSON array in the database.
    pub options: Json<Vec<String>>,

    /// The option value that counts as correct.
    pub correct_option: String,

    pub difficulty: Difficulty,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Question {
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }
}

/// DTO for sending a question to a participant (excludes correct option and difficulty).
#[derive(Debug, Serialize, FromRow)]
pub struct PublicQuestion {
    pub id: i64,
    #[sqlx(rename = "content")]
    pub text: String,
    pub options: Json<Vec<String>>,
}

/// DTO for creating a new question.
///
/// `difficulty` is kept as text so an unknown level is reported as a
/// validation failure rather than a body deserialization error.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1, max = 500), custom(function = validate_not_blank))]
    pub text: String,
    #[validate(custom(function = validate_options))]
    pub options: Vec<String>,
    #[validate(length(min = 1, max = 200))]
    pub correct_option: String,
    #[validate(custom(function = validate_difficulty))]
    pub difficulty: String,
}

impl CreateQuestionRequest {
    /// Checks that `correct_option` is one of the listed options.
    pub fn check_correct_option(&self) -> Result<(), String> {
        if self.options.contains(&self.correct_option) {
            Ok(())
        } else {
            Err(format!(
                "Correct option '{}' must be one of the options",
                self.correct_option
            ))
        }
    }
}

fn validate_options(options: &[String]) -> Result<(), validator::ValidationError> {
    if options.len() < MIN_QUESTION_OPTIONS {
        return Err(validator::ValidationError::new("too_few_options"));
    }
    if options.len() > MAX_QUESTION_OPTIONS {
        return Err(validator::ValidationError::new("too_many_options"));
    }
    let mut seen = HashSet::new();
    for opt in options {
        if opt.trim().is_empty() {
            return Err(validator::ValidationError::new("option_cannot_be_empty"));
        }
        if opt.len() > MAX_OPTION_LENGTH {
            return Err(validator::ValidationError::new("option_too_long"));
        }
        if !seen.insert(opt.as_str()) {
            return Err(validator::ValidationError::new("duplicate_option"));
        }
    }
    Ok(())
}

fn validate_difficulty(difficulty: &str) -> Result<(), validator::ValidationError> {
    match difficulty.parse::<Difficulty>() {
        Ok(_) => Ok(()),
        Err(_) => Err(validator::ValidationError::new("invalid_difficulty")),
    }
}
