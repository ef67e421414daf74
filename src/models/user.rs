// src/models/user.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::validate_not_blank;

/// Represents the 'users' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,

    pub name: String,

    /// Unique (case-insensitive) e-mail address.
    pub email: String,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// DTO for creating a new user.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(
        length(
            min = 1,
            max = 100,
            message = "Name length must be between 1 and 100 characters."
        ),
        custom(function = validate_not_blank, message = "Name cannot be blank.")
    )]
    pub name: String,
    #[validate(
        email(message = "Email must be a valid address."),
        length(max = 100, message = "Email must be at most 100 characters.")
    )]
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_request_accepts_valid_payload() {
        let req = CreateUserRequest {
            name: "Alice".to_string(),
            email: "alice@x.com".to_string(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_create_user_request_rejects_bad_email() {
        let req = CreateUserRequest {
            name: "Alice".to_string(),
            email: "not-an-email".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_user_request_rejects_blank_name() {
        let req = CreateUserRequest {
            name: "   ".to_string(),
            email: "alice@x.com".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_user_request_rejects_empty_name() {
        let req = CreateUserRequest {
            name: String::new(),
            email: "alice@x.com".to_string(),
        };
        assert!(req.validate().is_err());
    }
}
