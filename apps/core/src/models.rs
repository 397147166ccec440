use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A person using the service. User 1 is the seeded guest account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub user_id: i64,
    pub name: String,
    /// Unix timestamp in milliseconds.
    pub created_at: i64,
}

/// One user message and, once answered, the agent's reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ChatRecord {
    pub message_id: i64,
    pub user_id: i64,
    pub message: String,
    pub response: Option<String>,
    pub session_id: String,
    /// Label of the dominant category of `message`, set with the response.
    pub emotional_state: Option<String>,
    pub risk_score: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// One transcribed voice message and the agent's reply to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct VoiceRecord {
    pub voice_id: i64,
    pub user_id: i64,
    pub user_text: String,
    pub agent_response: Option<String>,
    pub session_id: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Classification stored next to an agent response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoredClassification<'a> {
    pub emotional_state: &'a str,
    pub risk_score: i64,
}
