//! Request and response bodies. Field names follow the camelCase JSON of the web client,
//! except the agent `/chat` schema which is snake_case.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::brain::{
    AgentReply, AgentType, CarePlan, EmotionalProgression, Empathy, MoodReport, RecommendedAction,
    Resource, SessionInsights, TherapeuticApproach, UserProfile,
};
use crate::models::{ChatRecord, User, VoiceRecord};

fn millis_to_datetime(millis: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(millis).unwrap_or_default()
}

// --- Users ---

#[derive(Debug, Deserialize, Validate)]
pub struct UserCreate {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOut {
    pub user_id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserOut {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            name: user.name,
            created_at: millis_to_datetime(user.created_at),
        }
    }
}

// --- Backend chat ---

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[validate(length(min = 1, max = 5000))]
    pub message: String,
    pub session_id: Option<String>,
    pub user_id: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub message_id: i64,
    pub session_id: String,
    pub response: String,
    pub agent_type: AgentType,
    pub confidence_score: u8,
    pub requires_immediate_attention: bool,
    pub emotional_state: String,
    pub risk_score: u8,
    pub recommended_action: RecommendedAction,
    pub recommendations: Vec<String>,
    pub resources: Vec<Resource>,
    pub success: bool,
    pub error: Option<String>,
}

impl ChatResponse {
    pub fn from_reply(message_id: i64, session_id: String, reply: AgentReply) -> Self {
        Self {
            message_id,
            session_id,
            emotional_state: reply.emotional_state().to_string(),
            risk_score: reply.risk_score(),
            requires_immediate_attention: reply.requires_immediate_attention(),
            response: reply.response,
            agent_type: reply.agent_type,
            confidence_score: reply.confidence_score,
            recommended_action: reply.recommended_action,
            recommendations: reply.recommendations,
            resources: reply.resources,
            success: true,
            error: None,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MessageCreate {
    pub user_id: i64,
    #[validate(length(min = 1, max = 5000))]
    pub message: String,
    #[validate(length(min = 1))]
    pub session_id: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ResponseUpdate {
    #[validate(length(min = 1))]
    pub response: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageOut {
    pub message_id: i64,
    pub user_id: i64,
    pub message: String,
    pub response: Option<String>,
    pub session_id: String,
    pub emotional_state: Option<String>,
    pub risk_score: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ChatRecord> for ChatMessageOut {
    fn from(record: ChatRecord) -> Self {
        Self {
            message_id: record.message_id,
            user_id: record.user_id,
            message: record.message,
            response: record.response,
            session_id: record.session_id,
            emotional_state: record.emotional_state,
            risk_score: record.risk_score,
            created_at: millis_to_datetime(record.created_at),
            updated_at: millis_to_datetime(record.updated_at),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatHistoryResponse {
    pub chats: Vec<ChatMessageOut>,
    pub total_count: usize,
}

impl From<Vec<ChatRecord>> for ChatHistoryResponse {
    fn from(records: Vec<ChatRecord>) -> Self {
        let chats: Vec<ChatMessageOut> = records.into_iter().map(Into::into).collect();
        Self {
            total_count: chats.len(),
            chats,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
}

impl HistoryQuery {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(50).clamp(1, 500)
    }
}

// --- Voice ---

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceTranscriptionResponse {
    pub voice_id: i64,
    pub transcribed_text: String,
    pub session_id: String,
    pub duration: f64,
    pub success: bool,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceChatResponse {
    pub voice_id: i64,
    pub transcribed_text: String,
    pub agent_response: String,
    pub agent_type: AgentType,
    pub emotional_state: String,
    pub requires_immediate_attention: bool,
    pub session_id: String,
    pub transcription_duration: f64,
    pub success: bool,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceOut {
    pub voice_id: i64,
    pub user_id: i64,
    pub user_text: String,
    pub agent_response: Option<String>,
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<VoiceRecord> for VoiceOut {
    fn from(record: VoiceRecord) -> Self {
        Self {
            voice_id: record.voice_id,
            user_id: record.user_id,
            user_text: record.user_text,
            agent_response: record.agent_response,
            session_id: record.session_id,
            created_at: millis_to_datetime(record.created_at),
            updated_at: millis_to_datetime(record.updated_at),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceHistoryResponse {
    pub voices: Vec<VoiceOut>,
    pub total_count: usize,
}

impl From<Vec<VoiceRecord>> for VoiceHistoryResponse {
    fn from(records: Vec<VoiceRecord>) -> Self {
        let voices: Vec<VoiceOut> = records.into_iter().map(Into::into).collect();
        Self {
            total_count: voices.len(),
            voices,
        }
    }
}

// --- Agent ---

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRequest {
    #[validate(length(min = 1))]
    pub session_id: String,
    #[validate(length(min = 1, max = 5000))]
    pub message: String,
    /// Earlier turns: plain strings or objects with a `message` field.
    #[serde(default)]
    pub session_history: Vec<Value>,
    /// Free-form details about the person, see `UserProfile::from_value`.
    #[serde(default)]
    pub user_profile: Option<Value>,
    /// Caller context such as `{"agent_type": "therapist"}`.
    #[serde(default)]
    pub context: Option<Value>,
}

impl ProcessRequest {
    /// Earlier user messages extracted from `session_history`, oldest first.
    pub fn history_messages(&self) -> Vec<String> {
        self.session_history
            .iter()
            .filter_map(|turn| match turn {
                Value::String(text) => Some(text.clone()),
                Value::Object(map) => map
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                _ => None,
            })
            .collect()
    }

    /// Emotional states recorded on earlier turns (`emotionalState` or `emotional_state`).
    pub fn history_states(&self) -> Vec<String> {
        self.session_history
            .iter()
            .filter_map(|turn| {
                let map = turn.as_object()?;
                map.get("emotionalState")
                    .or_else(|| map.get("emotional_state"))
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .collect()
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile::from_value(self.user_profile.as_ref())
    }

    /// Agent requested by the caller, if `context` names one.
    pub fn requested_agent(&self) -> Option<&str> {
        let context = self.context.as_ref()?;
        context
            .get("agent_type")
            .or_else(|| context.get("agentType"))
            .and_then(Value::as_str)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentResult {
    pub response: String,
    pub agent_type: AgentType,
    pub confidence_score: u8,
    pub requires_immediate_attention: bool,
    pub emotional_state: String,
    pub risk_score: u8,
    pub confidence: f32,
    pub matched_keywords: Vec<String>,
    pub recommended_action: RecommendedAction,
    pub immediate_actions: Vec<String>,
    pub resources: Vec<Resource>,
    pub recommendations: Vec<String>,
    pub approach: TherapeuticApproach,
    pub techniques: Vec<String>,
    pub follow_up_questions: Vec<String>,
    pub mood_analysis: MoodReport,
    pub emotional_progression: EmotionalProgression,
    pub empathy: Empathy,
    pub care_plan: CarePlan,
    pub session_insights: SessionInsights,
}

impl From<AgentReply> for AgentResult {
    fn from(reply: AgentReply) -> Self {
        Self {
            emotional_state: reply.emotional_state().to_string(),
            requires_immediate_attention: reply.requires_immediate_attention(),
            risk_score: reply.classification.risk_score,
            confidence: reply.classification.confidence,
            matched_keywords: reply.classification.matched_keywords,
            response: reply.response,
            agent_type: reply.agent_type,
            confidence_score: reply.confidence_score,
            recommended_action: reply.recommended_action,
            immediate_actions: reply.immediate_actions,
            resources: reply.resources,
            recommendations: reply.recommendations,
            approach: reply.approach,
            techniques: reply.techniques,
            follow_up_questions: reply.follow_up_questions,
            mood_analysis: reply.mood,
            emotional_progression: reply.progression,
            empathy: reply.empathy,
            care_plan: reply.care_plan,
            session_insights: reply.session,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResponse {
    pub status: String,
    pub result: AgentResult,
    pub session_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AgentChatRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    #[validate(length(min = 1, max = 5000))]
    pub message: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub agent_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AgentChatResponse {
    pub response: String,
    pub agent_type: AgentType,
    pub session_id: String,
    pub requires_attention: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_history_accepts_strings_and_objects() {
        let request: ProcessRequest = serde_json::from_value(json!({
            "sessionId": "s1",
            "message": "hi",
            "sessionHistory": [
                "first",
                {"message": "second", "emotionalState": "sad"},
                {"response": "no message here"},
                7
            ]
        }))
        .unwrap();
        assert_eq!(request.history_messages(), vec!["first", "second"]);
        assert_eq!(request.history_states(), vec!["sad"]);
        assert!(request.profile().is_empty());
        assert_eq!(request.requested_agent(), None);
    }

    #[test]
    fn test_process_profile_and_context() {
        let request: ProcessRequest = serde_json::from_value(json!({
            "sessionId": "s1",
            "message": "hi",
            "userProfile": {"user_id": "u-7", "name": "Ada", "goals": ["Walk daily"]},
            "context": {"agent_type": "trauma_specialist"}
        }))
        .unwrap();
        let profile = request.profile();
        assert_eq!(profile.name.as_deref(), Some("Ada"));
        assert_eq!(profile.goals, vec!["Walk daily"]);
        assert_eq!(request.requested_agent(), Some("trauma_specialist"));
    }

    #[test]
    fn test_chat_request_is_camel_case() {
        let request: ChatRequest =
            serde_json::from_value(json!({"message": "hello", "sessionId": "abc", "userId": 3}))
                .unwrap();
        assert_eq!(request.session_id.as_deref(), Some("abc"));
        assert_eq!(request.user_id, Some(3));
    }

    #[test]
    fn test_history_limit_is_clamped() {
        assert_eq!(HistoryQuery { limit: None }.limit(), 50);
        assert_eq!(HistoryQuery { limit: Some(0) }.limit(), 1);
        assert_eq!(HistoryQuery { limit: Some(10_000) }.limit(), 500);
    }
}
