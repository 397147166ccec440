use crate::models::{ChatRecord, StoredClassification, User, VoiceRecord};
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::info;

pub const GUEST_USER_ID: i64 = 1;

const CHAT_COLUMNS: &str = "message_id, user_id, message, response, session_id, emotional_state, \
     risk_score, created_at, updated_at";
const VOICE_COLUMNS: &str =
    "voice_id, user_id, user_text, agent_response, session_id, created_at, updated_at";

pub async fn init_db(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    info!("Initializing database at: {}", database_url);

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    bootstrap(&pool).await?;
    Ok(pool)
}

/// Creates the tables if they are missing and seeds the guest user. Safe to run repeatedly.
pub async fn bootstrap(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            user_id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            created_at INTEGER NOT NULL
        );
        CREATE TABLE IF NOT EXISTS chats (
            message_id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            message TEXT NOT NULL,
            response TEXT,
            session_id TEXT NOT NULL,
            emotional_state TEXT,
            risk_score INTEGER,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL,
            FOREIGN KEY(user_id) REFERENCES users(user_id)
        );
        CREATE INDEX IF NOT EXISTS idx_chats_session ON chats(session_id);
        CREATE INDEX IF NOT EXISTS idx_chats_user ON chats(user_id);
        CREATE TABLE IF NOT EXISTS voice (
            voice_id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            user_text TEXT NOT NULL,
            agent_response TEXT,
            session_id TEXT NOT NULL,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL,
            FOREIGN KEY(user_id) REFERENCES users(user_id)
        );
        CREATE INDEX IF NOT EXISTS idx_voice_session ON voice(session_id);
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("INSERT OR IGNORE INTO users (user_id, name, created_at) VALUES (?, 'Guest', ?)")
        .bind(GUEST_USER_ID)
        .bind(Utc::now().timestamp_millis())
        .execute(pool)
        .await?;

    info!("Database initialized.");
    Ok(())
}

// --- Users ---

pub async fn create_user(pool: &SqlitePool, name: &str) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (name, created_at)
        VALUES (?, ?)
        RETURNING user_id, name, created_at
        "#,
    )
    .bind(name)
    .bind(Utc::now().timestamp_millis())
    .fetch_one(pool)
    .await
}

pub async fn get_user(pool: &SqlitePool, user_id: i64) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT user_id, name, created_at FROM users WHERE user_id = ?")
        .bind(user_id)
        .fetch_one(pool)
        .await
}

pub async fn list_users(pool: &SqlitePool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT user_id, name, created_at FROM users ORDER BY user_id")
        .fetch_all(pool)
        .await
}

// --- Chats ---

pub async fn save_user_message(
    pool: &SqlitePool,
    user_id: i64,
    session_id: &str,
    message: &str,
) -> Result<ChatRecord, sqlx::Error> {
    let now = Utc::now().timestamp_millis();
    sqlx::query_as::<_, ChatRecord>(&format!(
        r#"
        INSERT INTO chats (user_id, message, session_id, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING {}
        "#,
        CHAT_COLUMNS
    ))
    .bind(user_id)
    .bind(message)
    .bind(session_id)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Stores the agent response for a message. Fails with `RowNotFound` for an unknown id.
///
/// An existing classification is kept when `classification` is `None`.
pub async fn save_agent_response(
    pool: &SqlitePool,
    message_id: i64,
    response: &str,
    classification: Option<StoredClassification<'_>>,
) -> Result<ChatRecord, sqlx::Error> {
    sqlx::query_as::<_, ChatRecord>(&format!(
        r#"
        UPDATE chats
        SET response = ?,
            emotional_state = COALESCE(?, emotional_state),
            risk_score = COALESCE(?, risk_score),
            updated_at = ?
        WHERE message_id = ?
        RETURNING {}
        "#,
        CHAT_COLUMNS
    ))
    .bind(response)
    .bind(classification.map(|c| c.emotional_state))
    .bind(classification.map(|c| c.risk_score))
    .bind(Utc::now().timestamp_millis())
    .bind(message_id)
    .fetch_one(pool)
    .await
}

/// Most recent messages of a user, newest first.
pub async fn chat_history_for_user(
    pool: &SqlitePool,
    user_id: i64,
    limit: i64,
) -> Result<Vec<ChatRecord>, sqlx::Error> {
    sqlx::query_as::<_, ChatRecord>(&format!(
        "SELECT {} FROM chats WHERE user_id = ? ORDER BY created_at DESC, message_id DESC LIMIT ?",
        CHAT_COLUMNS
    ))
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// All messages of a session, oldest first.
pub async fn chats_for_session(
    pool: &SqlitePool,
    session_id: &str,
) -> Result<Vec<ChatRecord>, sqlx::Error> {
    sqlx::query_as::<_, ChatRecord>(&format!(
        "SELECT {} FROM chats WHERE session_id = ? ORDER BY created_at ASC, message_id ASC",
        CHAT_COLUMNS
    ))
    .bind(session_id)
    .fetch_all(pool)
    .await
}

/// Recorded emotional states of a session, oldest first, optionally only before a message.
pub async fn previous_emotional_states(
    pool: &SqlitePool,
    session_id: &str,
    before_message_id: Option<i64>,
) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(
        r#"
        SELECT emotional_state FROM chats
        WHERE session_id = ?
          AND emotional_state IS NOT NULL
          AND (? IS NULL OR message_id < ?)
        ORDER BY created_at ASC, message_id ASC
        "#,
    )
    .bind(session_id)
    .bind(before_message_id)
    .bind(before_message_id)
    .fetch_all(pool)
    .await
}

// --- Voice ---

pub async fn save_voice_transcription(
    pool: &SqlitePool,
    user_id: i64,
    session_id: &str,
    user_text: &str,
) -> Result<VoiceRecord, sqlx::Error> {
    let now = Utc::now().timestamp_millis();
    sqlx::query_as::<_, VoiceRecord>(&format!(
        r#"
        INSERT INTO voice (user_id, user_text, session_id, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING {}
        "#,
        VOICE_COLUMNS
    ))
    .bind(user_id)
    .bind(user_text)
    .bind(session_id)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn save_voice_agent_response(
    pool: &SqlitePool,
    voice_id: i64,
    agent_response: &str,
) -> Result<VoiceRecord, sqlx::Error> {
    sqlx::query_as::<_, VoiceRecord>(&format!(
        r#"
        UPDATE voice
        SET agent_response = ?, updated_at = ?
        WHERE voice_id = ?
        RETURNING {}
        "#,
        VOICE_COLUMNS
    ))
    .bind(agent_response)
    .bind(Utc::now().timestamp_millis())
    .bind(voice_id)
    .fetch_one(pool)
    .await
}

/// Most recent voice messages of a user, newest first.
pub async fn voice_history_for_user(
    pool: &SqlitePool,
    user_id: i64,
    limit: i64,
) -> Result<Vec<VoiceRecord>, sqlx::Error> {
    sqlx::query_as::<_, VoiceRecord>(&format!(
        "SELECT {} FROM voice WHERE user_id = ? ORDER BY created_at DESC, voice_id DESC LIMIT ?",
        VOICE_COLUMNS
    ))
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// All voice messages of a session, oldest first.
pub async fn voice_for_session(
    pool: &SqlitePool,
    session_id: &str,
) -> Result<Vec<VoiceRecord>, sqlx::Error> {
    sqlx::query_as::<_, VoiceRecord>(&format!(
        "SELECT {} FROM voice WHERE session_id = ? ORDER BY created_at ASC, voice_id ASC",
        VOICE_COLUMNS
    ))
    .bind(session_id)
    .fetch_all(pool)
    .await
}
