// src/models/mod.rs

pub mod answer;
pub mod question;
pub mod trivia;
pub mod user;

/// Rejects text made only of whitespace; names are stored trimmed.
pub(crate) fn validate_not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("blank"));
    }
    Ok(())
}
