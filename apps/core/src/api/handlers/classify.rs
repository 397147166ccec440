use axum::{body::Bytes, extract::State, Json};
use serde_json::Value;

use crate::api::state::AppState;
use crate::brain::ClassificationResult;

/// Classifies `{"text": ...}` or a bare JSON string.
///
/// Never fails: a missing body, invalid JSON or a non-string `text` yields the neutral result.
pub async fn classify(State(state): State<AppState>, body: Bytes) -> Json<ClassificationResult> {
    let parsed: Option<Value> = serde_json::from_slice(&body).ok();
    let text = match &parsed {
        Some(Value::Object(map)) => map.get("text"),
        Some(value @ Value::String(_)) => Some(value),
        _ => None,
    };
    Json(state.classifier.classify_value(text))
}
