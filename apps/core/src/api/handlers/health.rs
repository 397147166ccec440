use axum::{extract::State, response::IntoResponse, Json};
use chrono::Utc;
use serde_json::json;

use crate::api::state::AppState;
use crate::preflight::{self, ConnectionReport};

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "mindbridge",
        "profile": state.config.profile.to_string(),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// Checks the database (when this profile has one) and the speech service.
pub async fn test_connection(State(state): State<AppState>) -> Json<ConnectionReport> {
    Json(preflight::run_connection_checks(state.pool_opt(), state.speech.as_ref()).await)
}
