use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use sqlx::SqlitePool;
use tracing::{info, instrument};
use validator::Validate;

use super::{non_blank, not_found_as, session_or_new};
use crate::api::schemas::{
    ChatHistoryResponse, ChatMessageOut, ChatRequest, ChatResponse, HistoryQuery, MessageCreate,
    ResponseUpdate,
};
use crate::api::extract::{AppJson, AppPath, AppQuery};
use crate::api::state::AppState;
use crate::brain::ConversationContext;
use crate::database::{self, GUEST_USER_ID};
use crate::error::AppError;
use crate::models::StoredClassification;

/// Earlier messages and recorded moods of a session, oldest first.
pub(crate) async fn session_context(
    pool: &SqlitePool,
    session_id: &str,
) -> Result<ConversationContext, AppError> {
    let history = database::chats_for_session(pool, session_id)
        .await?
        .into_iter()
        .map(|chat| chat.message)
        .collect();
    let states = database::previous_emotional_states(pool, session_id, None).await?;
    Ok(ConversationContext::new(history, &states))
}

/// Backend chat: stores the message, classifies it and stores the reply.
#[instrument(skip(state, request))]
pub async fn chat(
    State(state): State<AppState>,
    AppJson(request): AppJson<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    request.validate()?;
    let message = non_blank(&request.message)?;
    let session_id = session_or_new(request.session_id.clone());
    state.check_rate_limit(&session_id)?;

    let pool = state.pool()?;
    let user_id = request.user_id.unwrap_or(GUEST_USER_ID);
    database::get_user(pool, user_id)
        .await
        .map_err(not_found_as(format!("User {} not found", user_id)))?;

    let context = session_context(pool, &session_id).await?;
    let record = database::save_user_message(pool, user_id, &session_id, message).await?;
    let reply = state.classifier.respond(message, &context);

    database::save_agent_response(
        pool,
        record.message_id,
        &reply.response,
        Some(StoredClassification {
            emotional_state: reply.emotional_state(),
            risk_score: i64::from(reply.risk_score()),
        }),
    )
    .await?;

    info!(
        message_id = record.message_id,
        category = reply.emotional_state(),
        "Chat message answered"
    );
    Ok(Json(ChatResponse::from_reply(
        record.message_id,
        session_id,
        reply,
    )))
}

pub async fn create_message(
    State(state): State<AppState>,
    AppJson(request): AppJson<MessageCreate>,
) -> Result<(StatusCode, Json<ChatMessageOut>), AppError> {
    request.validate()?;
    let message = non_blank(&request.message)?;
    let pool = state.pool()?;
    database::get_user(pool, request.user_id)
        .await
        .map_err(not_found_as(format!("User {} not found", request.user_id)))?;

    let record =
        database::save_user_message(pool, request.user_id, request.session_id.trim(), message)
            .await?;
    Ok((StatusCode::CREATED, Json(record.into())))
}

pub async fn update_response(
    State(state): State<AppState>,
    AppPath(message_id): AppPath<i64>,
    AppJson(update): AppJson<ResponseUpdate>,
) -> Result<Json<ChatMessageOut>, AppError> {
    update.validate()?;
    let pool = state.pool()?;
    let record = database::save_agent_response(pool, message_id, &update.response, None)
        .await
        .map_err(not_found_as(format!("Message {} not found", message_id)))?;
    Ok(Json(record.into()))
}

#[instrument(skip(state))]
pub async fn user_chats(
    State(state): State<AppState>,
    AppPath(user_id): AppPath<i64>,
    AppQuery(query): AppQuery<HistoryQuery>,
) -> Result<Json<ChatHistoryResponse>, AppError> {
    let pool = state.pool()?;
    database::get_user(pool, user_id)
        .await
        .map_err(not_found_as(format!("User {} not found", user_id)))?;
    let chats = database::chat_history_for_user(pool, user_id, query.limit()).await?;
    Ok(Json(chats.into()))
}

#[instrument(skip(state))]
pub async fn session_chats(
    State(state): State<AppState>,
    AppPath(session_id): AppPath<String>,
) -> Result<Json<ChatHistoryResponse>, AppError> {
    let pool = state.pool()?;
    let chats = database::chats_for_session(pool, &session_id).await?;
    Ok(Json(chats.into()))
}
