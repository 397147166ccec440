//! Output structures of the classifier and responder.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::approach::TherapeuticApproach;
use super::empathy::Empathy;
use super::keywords::{Category, IMMEDIATE_ATTENTION_THRESHOLD};
use super::mood::{EmotionalProgression, Mood, MoodReport};
use super::recommend::{CarePlan, UserProfile};
use super::responses::{AgentType, Resource};
use super::risk::{RecommendedAction, RiskAssessment};
use super::session::SessionInsights;

/// Result of classifying one message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub dominant_category: Category,
    pub matched_keywords: Vec<String>,
    /// 0-10
    pub risk_score: u8,
    /// 0.0-1.0
    pub confidence: f32,
    pub requires_immediate_attention: bool,
}

impl ClassificationResult {
    pub fn neutral() -> Self {
        Self::from_assessment(&RiskAssessment::neutral(), Vec::new())
    }

    pub(crate) fn from_assessment(assessment: &RiskAssessment, keywords: Vec<String>) -> Self {
        Self {
            dominant_category: assessment.dominant,
            matched_keywords: keywords,
            risk_score: assessment.risk_score,
            confidence: assessment.confidence,
            requires_immediate_attention: assessment.risk_score >= IMMEDIATE_ATTENTION_THRESHOLD,
        }
    }

    pub fn recommended_action(&self) -> RecommendedAction {
        RecommendedAction::for_score(self.risk_score)
    }
}

/// What the responder knows about the conversation so far.
#[derive(Debug, Clone, Default)]
pub struct ConversationContext {
    /// Earlier user messages of the session, oldest first.
    pub history: Vec<String>,
    /// Emotional states recorded for the earlier messages, oldest first.
    pub previous_moods: Vec<Mood>,
    pub profile: UserProfile,
}

impl ConversationContext {
    pub fn new(history: Vec<String>, previous_states: &[String]) -> Self {
        Self {
            history,
            previous_moods: previous_states.iter().map(|s| Mood::from_state(s)).collect(),
            profile: UserProfile::default(),
        }
    }

    pub fn with_profile(mut self, profile: UserProfile) -> Self {
        self.profile = profile;
        self
    }
}

/// Full supportive reply for one message.
#[derive(Debug, Clone, Serialize)]
pub struct AgentReply {
    pub response: String,
    pub agent_type: AgentType,
    pub classification: ClassificationResult,
    /// Confidence reported by the selected persona, as a percentage.
    pub confidence_score: u8,
    pub recommended_action: RecommendedAction,
    pub immediate_actions: Vec<String>,
    pub resources: Vec<Resource>,
    pub recommendations: Vec<String>,
    pub mood: MoodReport,
    /// Mood across the session, this message included.
    pub progression: EmotionalProgression,
    pub empathy: Empathy,
    pub care_plan: CarePlan,
    pub approach: TherapeuticApproach,
    pub techniques: Vec<String>,
    pub follow_up_questions: Vec<String>,
    pub session: SessionInsights,
    pub timestamp: DateTime<Utc>,
}

impl AgentReply {
    pub fn emotional_state(&self) -> &'static str {
        self.classification.dominant_category.label()
    }

    pub fn requires_immediate_attention(&self) -> bool {
        self.classification.requires_immediate_attention
    }

    pub fn risk_score(&self) -> u8 {
        self.classification.risk_score
    }
}
