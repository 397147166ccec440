//! HTTP surface. One router builder serves every service profile.

pub mod extract;
pub mod handlers;
pub mod schemas;
pub mod state;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ServiceProfile;
use handlers::{agent, chat, classify, health, users, voice};
pub use state::AppState;

/// Upper bound for uploaded audio.
const MAX_AUDIO_BYTES: usize = 25 * 1024 * 1024;

/// Builds the router for the profile in `state.config`.
pub fn router(state: AppState) -> Router {
    let common = Router::new()
        .route("/health", get(health::health))
        .route("/test-connection", get(health::test_connection))
        .route("/classify", post(classify::classify));

    let routes = match state.config.profile {
        ServiceProfile::Backend => common.merge(backend_routes()),
        ServiceProfile::Agent => common.merge(agent_routes()),
        ServiceProfile::Combined => common
            .merge(backend_routes())
            .route("/process", post(agent::process)),
    };

    routes
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Persistence-backed routes: users, chats and voice.
fn backend_routes() -> Router<AppState> {
    Router::new()
        // Chat
        .route("/chat", post(chat::chat))
        .route("/messages", post(chat::create_message))
        .route("/messages/:id/response", put(chat::update_response))
        .route("/users/:id/chats", get(chat::user_chats))
        .route("/sessions/:id/chats", get(chat::session_chats))

        // Users
        .route("/users", post(users::create_user).get(users::list_users))
        .route("/users/:id", get(users::get_user))

        // Voice
        .route(
            "/voice/transcribe",
            post(voice::transcribe).layer(DefaultBodyLimit::max(MAX_AUDIO_BYTES)),
        )
        .route(
            "/voice/chat",
            post(voice::voice_chat).layer(DefaultBodyLimit::max(MAX_AUDIO_BYTES)),
        )
        .route("/users/:id/voice", get(voice::user_voice))
        .route("/sessions/:id/voice", get(voice::session_voice))
}

/// Stateless agent routes.
fn agent_routes() -> Router<AppState> {
    Router::new()
        .route("/process", post(agent::process))
        .route("/chat", post(agent::chat))
}
