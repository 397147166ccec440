use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::io;
use thiserror::Error;
use tracing::error;

use crate::actors::messages::ActorError;

/// Application-wide error type, consolidating all possible errors into a single enum.
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors originating from the database, typically from `sqlx`.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Standard input/output errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors from the transcription worker or the speech service behind it.
    #[error("Actor error: {0}")]
    Actor(#[from] ActorError),

    /// Invalid input (bad JSON, empty audio, failed field validation).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration errors (e.g., malformed environment variables).
    #[error("Configuration error: {0}")]
    Config(String),

    /// A requested record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unexpected internal errors that indicate a bug.
    #[error("Internal error: {0}")]
    Internal(String),

    /// Operations that did not complete in time.
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Too many requests for one session inside the rate-limit window.
    #[error("Rate limit exceeded")]
    RateLimited,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(sqlx::Error::RowNotFound) => StatusCode::NOT_FOUND,
            AppError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AppError::Timeout(_) | AppError::Actor(ActorError::Timeout(_)) => {
                StatusCode::GATEWAY_TIMEOUT
            }
            AppError::Actor(ActorError::Transcription(_) | ActorError::Unavailable(_)) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::Database(_)
            | AppError::Io(_)
            | AppError::Actor(_)
            | AppError::Config(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self.status_code() {
            StatusCode::BAD_REQUEST => "BAD_REQUEST",
            StatusCode::NOT_FOUND => "NOT_FOUND",
            StatusCode::TOO_MANY_REQUESTS => "RATE_LIMITED",
            StatusCode::GATEWAY_TIMEOUT => "TIMEOUT",
            StatusCode::BAD_GATEWAY => "UPSTREAM_ERROR",
            _ => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }

        let body = json!({
            "error": true,
            "message": self.to_string(),
            "status": status.as_u16(),
            "error_code": self.error_code(),
        });

        (status, Json(body)).into_response()
    }
}

impl From<tokio::time::error::Elapsed> for AppError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        AppError::Timeout(format!("Operation timed out: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Validation(format!("JSON error: {}", err))
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::Config(format!("URL parse error: {}", err))
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::Validation(format!("UUID error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(format!("Validation errors: {}", err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Timeout(format!("HTTP request timed out: {}", err))
        } else {
            AppError::Io(io::Error::other(format!("HTTP error: {}", err)))
        }
    }
}

impl From<axum::extract::multipart::MultipartError> for AppError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        AppError::Validation(format!("Multipart error: {}", err))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(format!("Invalid JSON body: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(format!("Invalid query: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(format!("Invalid path: {}", rejection.body_text()))
    }
}
