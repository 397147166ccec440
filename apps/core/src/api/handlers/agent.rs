use axum::{extract::State, Json};
use chrono::Utc;
use tracing::{debug, instrument};
use validator::Validate;

use super::{non_blank, session_or_new};
use crate::api::schemas::{AgentChatRequest, AgentChatResponse, ProcessRequest, ProcessResponse};
use crate::api::extract::AppJson;
use crate::api::state::AppState;
use crate::brain::ConversationContext;
use crate::error::AppError;

/// Agent processing endpoint: the caller supplies the session history.
#[instrument(skip(state, request), fields(session_id = %request.session_id))]
pub async fn process(
    State(state): State<AppState>,
    AppJson(request): AppJson<ProcessRequest>,
) -> Result<Json<ProcessResponse>, AppError> {
    request.validate()?;
    let message = non_blank(&request.message)?;
    state.check_rate_limit(&request.session_id)?;

    if let Some(requested) = request.requested_agent() {
        // Routing follows the classification; the hint is only recorded.
        debug!(requested_agent = requested, "Agent type hint received");
    }

    let context = ConversationContext::new(request.history_messages(), &request.history_states())
        .with_profile(request.profile());
    let reply = state.classifier.respond(message, &context);

    Ok(Json(ProcessResponse {
        status: "success".to_string(),
        result: reply.into(),
        session_id: request.session_id,
        timestamp: Utc::now(),
    }))
}

/// Stateless agent chat with the snake_case schema.
#[instrument(skip(state, request))]
pub async fn chat(
    State(state): State<AppState>,
    AppJson(request): AppJson<AgentChatRequest>,
) -> Result<Json<AgentChatResponse>, AppError> {
    request.validate()?;
    let message = non_blank(&request.message)?;
    let session_id = session_or_new(request.session_id.clone());
    state.check_rate_limit(&session_id)?;

    if let Some(requested) = request.agent_type.as_deref() {
        // Routing follows the classification; the hint is only recorded.
        debug!(requested_agent = requested, "Agent type hint received");
    }

    let reply = state
        .classifier
        .respond(message, &ConversationContext::default());

    Ok(Json(AgentChatResponse {
        requires_attention: reply.requires_immediate_attention(),
        response: reply.response,
        agent_type: reply.agent_type,
        session_id,
    }))
}
