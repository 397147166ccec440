//! Classifier - main orchestrator for the brain module.
//!
//! Runs the keyword scanner and risk aggregator to classify a message, then layers template
//! selection, mood analysis, empathy, a care plan, approach selection and session insights on
//! top to build a reply.
//! Everything here is pure: no I/O, no shared mutable state.

use chrono::Utc;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, warn};

use super::approach::TherapeuticApproach;
use super::empathy::Empathy;
use super::keywords::{catalog, Category, KeywordCatalog};
use super::mood::{self, EmotionalProgression, Mood};
use super::recommend::CarePlan;
use super::report::{AgentReply, ClassificationResult, ConversationContext};
use super::responses::{self, Resource};
use super::risk::{self, RecommendedAction};
use super::scanner::{self, normalize};
use super::session::SessionInsights;

/// Stateless message classifier. Cheap to copy and safe to share across tasks.
#[derive(Debug, Clone, Copy)]
pub struct Classifier {
    catalog: &'static KeywordCatalog,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier {
    pub fn new() -> Self {
        Self { catalog: catalog() }
    }

    /// Classifies a message. Never fails; text without keywords is neutral.
    pub fn classify(&self, text: &str) -> ClassificationResult {
        let scan = scanner::scan_with(self.catalog, text);
        let assessment = risk::aggregate(&scan);
        let keywords = scan
            .matched_keywords()
            .into_iter()
            .map(str::to_string)
            .collect();
        ClassificationResult::from_assessment(&assessment, keywords)
    }

    /// Classifies an arbitrary JSON value. Anything but a string yields the neutral result.
    pub fn classify_value(&self, value: Option<&Value>) -> ClassificationResult {
        match value {
            Some(Value::String(text)) => self.classify(text),
            _ => ClassificationResult::neutral(),
        }
    }

    /// Classifies a message and assembles the full supportive reply.
    pub fn respond(&self, text: &str, context: &ConversationContext) -> AgentReply {
        let start = Instant::now();

        let classification = self.classify(text);
        let template = responses::select(
            classification.dominant_category,
            classification.risk_score,
        );

        let mut resources: Vec<Resource> = template.resources.to_vec();
        if classification.dominant_category == Category::SubstanceRisk {
            resources.extend_from_slice(responses::substance_resources());
        }

        let approach = TherapeuticApproach::select(&normalize(text), classification.risk_score);
        let mood = mood::analyze(text, &context.previous_moods);
        let session = SessionInsights::from_history(&context.history, text);

        let current_mood = Mood::from_state(classification.dominant_category.label());
        let mut journey = context.previous_moods.clone();
        journey.push(current_mood);
        let progression = EmotionalProgression::from_moods(&journey);
        let empathy = Empathy::for_category(classification.dominant_category, &context.profile);
        let care_plan = CarePlan::build(current_mood, classification.risk_score, &context.profile);

        if classification.requires_immediate_attention {
            // The message body stays out of the logs.
            warn!(
                category = %classification.dominant_category,
                risk_score = classification.risk_score,
                session_number = session.session_number,
                "High-risk message detected"
            );
        }

        debug!(
            category = %classification.dominant_category,
            risk_score = classification.risk_score,
            elapsed_us = start.elapsed().as_micros() as u64,
            "Reply assembled"
        );

        AgentReply {
            response: template.response.to_string(),
            agent_type: template.agent_type,
            confidence_score: template.confidence_score,
            recommended_action: RecommendedAction::for_score(classification.risk_score),
            immediate_actions: template.immediate_actions(),
            resources,
            recommendations: template.recommendations(),
            mood,
            progression,
            empathy,
            care_plan,
            approach,
            techniques: approach.techniques().iter().map(|t| t.to_string()).collect(),
            follow_up_questions: approach
                .follow_up_questions()
                .iter()
                .map(|q| q.to_string())
                .collect(),
            session,
            classification,
            timestamp: Utc::now(),
        }
    }
}

/// Classifies a message with the shared catalogue.
pub fn classify(text: &str) -> ClassificationResult {
    Classifier::new().classify(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::keywords::IMMEDIATE_ATTENTION_THRESHOLD;
    use crate::brain::recommend::UserProfile;
    use crate::brain::responses::AgentType;
    use serde_json::json;

    #[test]
    fn test_hopeless_and_end_it_all_is_crisis() {
        let result = classify("I feel hopeless and want to end it all");
        assert_eq!(result.dominant_category, Category::Crisis);
        assert!(result.risk_score >= IMMEDIATE_ATTENTION_THRESHOLD);
        assert!(result.requires_immediate_attention);
        assert!(result.matched_keywords.contains(&"end it all".to_string()));
        assert!(result.matched_keywords.contains(&"hopeless".to_string()));
    }

    #[test]
    fn test_ordinary_day_is_neutral() {
        let result = classify("I had a long day at work");
        assert_eq!(result.dominant_category, Category::Neutral);
        assert_eq!(result.risk_score, 0);
        assert_eq!(result.confidence, 0.0);
        assert!(result.matched_keywords.is_empty());
    }

    #[test]
    fn test_anxious_message() {
        let result = classify("I'm anxious and can't stop worrying, it's overwhelming");
        assert_eq!(result.dominant_category, Category::Anxiety);
        assert!((3..=6).contains(&result.risk_score));
        assert!(!result.requires_immediate_attention);
    }

    #[test]
    fn test_non_string_value_is_neutral() {
        let classifier = Classifier::new();
        assert_eq!(classifier.classify_value(None), ClassificationResult::neutral());
        assert_eq!(
            classifier.classify_value(Some(&json!(42))),
            ClassificationResult::neutral()
        );
        assert_eq!(
            classifier.classify_value(Some(&json!({"text": "suicide"}))),
            ClassificationResult::neutral()
        );
        assert_eq!(
            classifier
                .classify_value(Some(&json!("I am suicidal")))
                .dominant_category,
            Category::Crisis
        );
    }

    #[test]
    fn test_respond_crisis_uses_crisis_template() {
        let reply = Classifier::new().respond(
            "I have pills saved and I'm planning to take them tonight",
            &ConversationContext::default(),
        );
        assert_eq!(reply.classification.dominant_category, Category::SubstanceRisk);
        assert_eq!(reply.agent_type, AgentType::CrisisSupport);
        assert_eq!(reply.recommended_action, RecommendedAction::ImmediateCrisisIntervention);
        assert_eq!(reply.approach, TherapeuticApproach::CrisisIntervention);
        assert!(reply.resources.iter().any(|r| r.contact == "988"));
        assert!(reply.resources.iter().any(|r| r.contact == "1-800-662-4357"));
    }

    #[test]
    fn test_modifiers_escalate_to_crisis_template() {
        // distress (6) + urgency (2) reaches the threshold
        let reply = Classifier::new().respond(
            "I feel trapped and I can't do this tonight",
            &ConversationContext::default(),
        );
        assert_eq!(reply.classification.dominant_category, Category::Distress);
        assert_eq!(reply.risk_score(), 8);
        assert_eq!(reply.agent_type, AgentType::CrisisSupport);
        assert_eq!(reply.emotional_state(), "distress");
    }

    #[test]
    fn test_respond_uses_context() {
        let context = ConversationContext::new(
            vec!["My boss is awful".to_string(), "work again".to_string()],
            &["anxious".to_string(), "sad".to_string()],
        );
        let reply = Classifier::new().respond("I'm so worried about work", &context);
        assert_eq!(reply.session.session_number, 3);
        assert_eq!(reply.session.recurring_themes, vec!["Work Stress"]);
        assert_eq!(reply.mood.trend, mood::MoodTrend::ConcerningDecline);
        assert_eq!(reply.agent_type, AgentType::Therapist);
        assert_eq!(reply.recommended_action, RecommendedAction::StandardTherapeuticSupport);
        // anxious, sad, then anxious again
        assert_eq!(reply.progression.valence_progression, vec![-1, -1, -1]);
        assert_eq!(reply.progression.dominant_emotion, Some(Mood::Anxious));
    }

    #[test]
    fn test_respond_uses_profile() {
        let profile = UserProfile {
            name: Some("Sam".to_string()),
            goals: vec!["Sleep before midnight".to_string()],
        };
        let context = ConversationContext::default().with_profile(profile);
        let reply = Classifier::new().respond("I'm so angry at everyone", &context);

        assert_eq!(reply.classification.dominant_category, Category::Anger);
        assert!(reply.empathy.connection_building.starts_with("Sam, "));
        assert!(reply.empathy.emotional_reflection.contains("angry"));
        assert_eq!(reply.care_plan.follow_up_goals[0], "Learn healthy anger expression");
        assert_eq!(
            reply.care_plan.follow_up_goals.last().map(String::as_str),
            Some("Sleep before midnight")
        );
    }

    #[test]
    fn test_crisis_reply_care_plan_leads_with_safety() {
        let reply = Classifier::new()
            .respond("I want to kill myself", &ConversationContext::default());
        assert!(reply.care_plan.immediate_strategies[0].starts_with("Remove any means"));
        assert!(reply.empathy.emotional_reflection.contains("hopeless"));
        assert_eq!(reply.progression.valence_progression, vec![-1]);
    }
}
