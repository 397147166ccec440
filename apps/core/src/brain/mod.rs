//! # Brain Module
//!
//! Keyword-driven risk and mood classification for MindBridge, plus response selection.
//! Pure functions over a frozen catalogue; safe to call from any number of tasks.
//!
//! ## Components
//! - `keywords`: Category catalogue, severities and contextual modifiers
//! - `scanner`: Substring keyword scanner
//! - `risk`: Risk score, dominant category and confidence
//! - `responses`: Static response templates and support resources
//! - `mood`: Mood indicators, emotional phrases, trend and progression
//! - `empathy`: Validating opener and reflection of the feeling
//! - `recommend`: Care plan and caller profile
//! - `approach`: Therapeutic approach selection
//! - `session`: Recurring themes and progress across a session
//! - `report`: Output data structures
//! - `analyzer`: Main orchestrator

pub mod analyzer;
pub mod approach;
pub mod empathy;
pub mod keywords;
pub mod mood;
pub mod recommend;
pub mod report;
pub mod responses;
pub mod risk;
pub mod scanner;
pub mod session;

pub use analyzer::{classify, Classifier};
pub use approach::TherapeuticApproach;
pub use keywords::{Category, IMMEDIATE_ATTENTION_THRESHOLD, MAX_RISK_SCORE};
pub use empathy::Empathy;
pub use mood::{EmotionalProgression, Mood, MoodReport, MoodTrend};
pub use recommend::{CarePlan, UserProfile};
pub use report::{AgentReply, ClassificationResult, ConversationContext};
pub use responses::{AgentType, Resource, ResponseTemplate};
pub use risk::RecommendedAction;
pub use session::{EngagementLevel, SessionInsights};
