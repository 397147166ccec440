pub mod agent;
pub mod chat;
pub mod classify;
pub mod health;
pub mod users;
pub mod voice;

use crate::error::AppError;

/// Turns a missing row into a `NotFound` with a readable message.
pub(crate) fn not_found_as(message: impl Into<String>) -> impl FnOnce(sqlx::Error) -> AppError {
    let message = message.into();
    move |err| match err {
        sqlx::Error::RowNotFound => AppError::NotFound(message),
        other => AppError::Database(other),
    }
}

/// Uses the given session id, or a fresh one when it is absent or blank.
pub(crate) fn session_or_new(session_id: Option<String>) -> String {
    session_id
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

/// Rejects messages that are empty once trimmed.
pub(crate) fn non_blank(text: &str) -> Result<&str, AppError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(AppError::Validation("Message cannot be empty".to_string()))
    } else {
        Ok(trimmed)
    }
}
