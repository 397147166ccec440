use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::{info, instrument};

use super::{not_found_as, session_or_new};
use crate::actors::messages::AudioClip;
use crate::api::schemas::{
    HistoryQuery, VoiceChatResponse, VoiceHistoryResponse, VoiceTranscriptionResponse,
};
use crate::api::extract::{AppPath, AppQuery};
use crate::api::state::AppState;
use crate::brain::{Classifier, ConversationContext};
use crate::database::{self, GUEST_USER_ID};
use crate::error::AppError;
use crate::models::VoiceRecord;

/// Audio plus the form fields sent next to it.
#[derive(Debug)]
struct VoiceUpload {
    clip: AudioClip,
    user_id: i64,
    session_id: String,
}

async fn read_upload(mut multipart: Multipart) -> Result<VoiceUpload, AppError> {
    let mut clip = None;
    let mut user_id = None;
    let mut session_id = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "audio" | "file" => {
                let file_name = field.file_name().unwrap_or("audio.wav").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await?;
                clip = Some(AudioClip::new(bytes.to_vec(), file_name, content_type));
            }
            "userId" | "user_id" => {
                let raw = field.text().await?;
                let parsed = raw
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| AppError::Validation(format!("Invalid userId '{}'", raw)))?;
                user_id = Some(parsed);
            }
            "sessionId" | "session_id" => session_id = Some(field.text().await?),
            _ => {}
        }
    }

    let clip = clip.ok_or_else(|| AppError::Validation("No audio file provided".to_string()))?;
    if clip.is_empty() {
        return Err(AppError::Validation("Audio file is empty".to_string()));
    }

    Ok(VoiceUpload {
        clip,
        user_id: user_id.unwrap_or(GUEST_USER_ID),
        session_id: session_or_new(session_id),
    })
}

/// Earlier turns of a voice session. Voice records store no emotional state, so the earlier
/// texts are classified again to recover the mood history.
pub(crate) fn voice_context(
    classifier: &Classifier,
    earlier: Vec<VoiceRecord>,
) -> ConversationContext {
    let states: Vec<String> = earlier
        .iter()
        .map(|voice| {
            classifier
                .classify(&voice.user_text)
                .dominant_category
                .label()
                .to_string()
        })
        .collect();
    let history = earlier.into_iter().map(|voice| voice.user_text).collect();
    ConversationContext::new(history, &states)
}

/// Transcribes an upload and stores the text.
#[instrument(skip(state, multipart))]
pub async fn transcribe(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<VoiceTranscriptionResponse>, AppError> {
    let upload = read_upload(multipart).await?;
    let pool = state.pool()?;
    database::get_user(pool, upload.user_id)
        .await
        .map_err(not_found_as(format!("User {} not found", upload.user_id)))?;

    let transcription = state.speech.transcribe(upload.clip).await?;
    let record = database::save_voice_transcription(
        pool,
        upload.user_id,
        &upload.session_id,
        &transcription.text,
    )
    .await?;

    Ok(Json(VoiceTranscriptionResponse {
        voice_id: record.voice_id,
        transcribed_text: transcription.text,
        session_id: upload.session_id,
        duration: transcription.duration,
        success: true,
        error: None,
    }))
}

/// Transcribes an upload, answers it and stores both sides.
#[instrument(skip(state, multipart))]
pub async fn voice_chat(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<VoiceChatResponse>, AppError> {
    let upload = read_upload(multipart).await?;
    state.check_rate_limit(&upload.session_id)?;

    let pool = state.pool()?;
    database::get_user(pool, upload.user_id)
        .await
        .map_err(not_found_as(format!("User {} not found", upload.user_id)))?;

    let transcription = state.speech.transcribe(upload.clip).await?;
    if transcription.text.trim().is_empty() {
        return Err(AppError::Validation(
            "No speech detected in the audio".to_string(),
        ));
    }

    let context = voice_context(
        &state.classifier,
        database::voice_for_session(pool, &upload.session_id).await?,
    );
    let record = database::save_voice_transcription(
        pool,
        upload.user_id,
        &upload.session_id,
        &transcription.text,
    )
    .await?;

    let reply = state
        .classifier
        .respond(&transcription.text, &context);
    database::save_voice_agent_response(pool, record.voice_id, &reply.response).await?;

    info!(
        voice_id = record.voice_id,
        category = reply.emotional_state(),
        "Voice message answered"
    );
    Ok(Json(VoiceChatResponse {
        voice_id: record.voice_id,
        emotional_state: reply.emotional_state().to_string(),
        requires_immediate_attention: reply.requires_immediate_attention(),
        agent_type: reply.agent_type,
        agent_response: reply.response,
        transcribed_text: transcription.text,
        session_id: upload.session_id,
        transcription_duration: transcription.duration,
        success: true,
        error: None,
    }))
}

pub async fn user_voice(
    State(state): State<AppState>,
    AppPath(user_id): AppPath<i64>,
    AppQuery(query): AppQuery<HistoryQuery>,
) -> Result<Json<VoiceHistoryResponse>, AppError> {
    let pool = state.pool()?;
    database::get_user(pool, user_id)
        .await
        .map_err(not_found_as(format!("User {} not found", user_id)))?;
    let voices = database::voice_history_for_user(pool, user_id, query.limit()).await?;
    Ok(Json(voices.into()))
}

pub async fn session_voice(
    State(state): State<AppState>,
    AppPath(session_id): AppPath<String>,
) -> Result<Json<VoiceHistoryResponse>, AppError> {
    let voices = database::voice_for_session(state.pool()?, &session_id).await?;
    Ok(Json(voices.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::{Mood, MoodTrend};

    fn record(voice_id: i64, text: &str) -> VoiceRecord {
        VoiceRecord {
            voice_id,
            user_id: GUEST_USER_ID,
            user_text: text.to_string(),
            agent_response: Some("ok".to_string()),
            session_id: "voice".to_string(),
            created_at: voice_id,
            updated_at: voice_id,
        }
    }

    #[test]
    fn test_voice_context_recovers_moods() {
        let classifier = Classifier::new();
        let context = voice_context(
            &classifier,
            vec![
                record(1, "I'm so worried about tomorrow"),
                record(2, "I feel sad and lonely"),
            ],
        );
        assert_eq!(context.history.len(), 2);
        assert_eq!(context.previous_moods, vec![Mood::Anxious, Mood::Depressed]);

        let reply = classifier.respond("still anxious", &context);
        assert_eq!(reply.session.session_number, 3);
        assert_eq!(reply.mood.trend, MoodTrend::ConcerningDecline);
    }

    #[test]
    fn test_voice_context_for_new_session() {
        let context = voice_context(&Classifier::new(), Vec::new());
        assert!(context.history.is_empty());
        assert!(context.previous_moods.is_empty());
    }
}
