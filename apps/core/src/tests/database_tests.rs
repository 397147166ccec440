//! Database Module Tests
//!
//! Tests for users, chat messages and voice messages.

use crate::database::{self, GUEST_USER_ID};
use crate::models::StoredClassification;
use sqlx::sqlite::SqlitePool;
use tempfile::{tempdir, TempDir};

/// Create a test database pool with a temporary file.
///
/// The directory is returned so it outlives the pool.
pub(crate) async fn create_test_pool() -> (TempDir, SqlitePool) {
    let dir = tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("test.sqlite");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let pool = database::init_db(&db_url)
        .await
        .expect("Failed to initialize test database");

    (dir, pool)
}

#[cfg(test)]
mod user_tests {
    use super::*;

    #[tokio::test]
    async fn test_guest_user_is_seeded() {
        let (_dir, pool) = create_test_pool().await;

        let guest = database::get_user(&pool, GUEST_USER_ID)
            .await
            .expect("Guest user missing");
        assert_eq!(guest.name, "Guest");
    }

    #[tokio::test]
    async fn test_bootstrap_is_idempotent() {
        let (_dir, pool) = create_test_pool().await;

        database::bootstrap(&pool).await.expect("Second bootstrap failed");
        let users = database::list_users(&pool).await.unwrap();
        assert_eq!(users.len(), 1);
    }

    #[tokio::test]
    async fn test_create_and_list_users() {
        let (_dir, pool) = create_test_pool().await;

        let alice = database::create_user(&pool, "Alice").await.unwrap();
        let bob = database::create_user(&pool, "Bob").await.unwrap();
        assert_ne!(alice.user_id, bob.user_id);
        assert!(alice.created_at > 0);

        let names: Vec<String> = database::list_users(&pool)
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.name)
            .collect();
        assert_eq!(names, vec!["Guest", "Alice", "Bob"]);
    }

    #[tokio::test]
    async fn test_get_missing_user() {
        let (_dir, pool) = create_test_pool().await;

        let result = database::get_user(&pool, 999).await;
        assert!(matches!(result, Err(sqlx::Error::RowNotFound)));
    }
}

#[cfg(test)]
mod chat_tests {
    use super::*;

    #[tokio::test]
    async fn test_save_message_then_response() {
        let (_dir, pool) = create_test_pool().await;

        let saved = database::save_user_message(&pool, GUEST_USER_ID, "s1", "I feel sad")
            .await
            .unwrap();
        assert!(saved.response.is_none());
        assert!(saved.emotional_state.is_none());

        let answered = database::save_agent_response(
            &pool,
            saved.message_id,
            "I'm sorry you're feeling this way.",
            Some(StoredClassification {
                emotional_state: "sad",
                risk_score: 4,
            }),
        )
        .await
        .unwrap();
        assert_eq!(answered.message_id, saved.message_id);
        assert_eq!(answered.response.as_deref(), Some("I'm sorry you're feeling this way."));
        assert_eq!(answered.emotional_state.as_deref(), Some("sad"));
        assert_eq!(answered.risk_score, Some(4));
        assert!(answered.updated_at >= saved.updated_at);
    }

    #[tokio::test]
    async fn test_response_without_classification_keeps_existing() {
        let (_dir, pool) = create_test_pool().await;

        let saved = database::save_user_message(&pool, GUEST_USER_ID, "s1", "worried")
            .await
            .unwrap();
        database::save_agent_response(
            &pool,
            saved.message_id,
            "first",
            Some(StoredClassification {
                emotional_state: "anxious",
                risk_score: 4,
            }),
        )
        .await
        .unwrap();

        let updated = database::save_agent_response(&pool, saved.message_id, "second", None)
            .await
            .unwrap();
        assert_eq!(updated.response.as_deref(), Some("second"));
        assert_eq!(updated.emotional_state.as_deref(), Some("anxious"));
        assert_eq!(updated.risk_score, Some(4));
    }

    #[tokio::test]
    async fn test_response_for_missing_message() {
        let (_dir, pool) = create_test_pool().await;

        let result = database::save_agent_response(&pool, 404, "nobody", None).await;
        assert!(matches!(result, Err(sqlx::Error::RowNotFound)));
    }

    #[tokio::test]
    async fn test_message_for_unknown_user_is_rejected() {
        let (_dir, pool) = create_test_pool().await;

        let result = database::save_user_message(&pool, 777, "s1", "hello").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_session_order_and_user_history() {
        let (_dir, pool) = create_test_pool().await;

        for text in ["one", "two", "three"] {
            database::save_user_message(&pool, GUEST_USER_ID, "ordered", text)
                .await
                .unwrap();
        }
        database::save_user_message(&pool, GUEST_USER_ID, "other", "elsewhere")
            .await
            .unwrap();

        let session: Vec<String> = database::chats_for_session(&pool, "ordered")
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.message)
            .collect();
        assert_eq!(session, vec!["one", "two", "three"]);

        let recent = database::chat_history_for_user(&pool, GUEST_USER_ID, 2)
            .await
            .unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].message, "elsewhere");
        assert_eq!(recent[1].message, "three");
    }

    #[tokio::test]
    async fn test_previous_emotional_states() {
        let (_dir, pool) = create_test_pool().await;

        let mut ids = Vec::new();
        for (text, state) in [("a", "sad"), ("b", "anxious"), ("c", "neutral")] {
            let saved = database::save_user_message(&pool, GUEST_USER_ID, "moods", text)
                .await
                .unwrap();
            database::save_agent_response(
                &pool,
                saved.message_id,
                "ok",
                Some(StoredClassification {
                    emotional_state: state,
                    risk_score: 0,
                }),
            )
            .await
            .unwrap();
            ids.push(saved.message_id);
        }
        // Unanswered messages have no state yet
        database::save_user_message(&pool, GUEST_USER_ID, "moods", "d")
            .await
            .unwrap();

        let all = database::previous_emotional_states(&pool, "moods", None)
            .await
            .unwrap();
        assert_eq!(all, vec!["sad", "anxious", "neutral"]);

        let before_last = database::previous_emotional_states(&pool, "moods", Some(ids[2]))
            .await
            .unwrap();
        assert_eq!(before_last, vec!["sad", "anxious"]);
    }
}

#[cfg(test)]
mod voice_tests {
    use super::*;

    #[tokio::test]
    async fn test_voice_round_trip() {
        let (_dir, pool) = create_test_pool().await;

        let saved = database::save_voice_transcription(&pool, GUEST_USER_ID, "v1", "hello there")
            .await
            .unwrap();
        assert!(saved.agent_response.is_none());

        let answered = database::save_voice_agent_response(&pool, saved.voice_id, "hi!")
            .await
            .unwrap();
        assert_eq!(answered.agent_response.as_deref(), Some("hi!"));

        let session = database::voice_for_session(&pool, "v1").await.unwrap();
        assert_eq!(session, vec![answered.clone()]);

        let history = database::voice_history_for_user(&pool, GUEST_USER_ID, 10)
            .await
            .unwrap();
        assert_eq!(history, vec![answered]);
    }

    #[tokio::test]
    async fn test_voice_response_for_missing_record() {
        let (_dir, pool) = create_test_pool().await;

        let result = database::save_voice_agent_response(&pool, 12, "nothing").await;
        assert!(matches!(result, Err(sqlx::Error::RowNotFound)));
    }
}
