//! Pre-authored response templates.
//!
//! Every `Category` resolves to exactly one template through an exhaustive match, so adding a
//! category without a template is a compile error.

use serde::{Deserialize, Serialize};

use super::keywords::{Category, IMMEDIATE_ATTENTION_THRESHOLD};

/// A support resource shown next to a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resource {
    pub name: &'static str,
    pub contact: &'static str,
    pub availability: &'static str,
}

/// Kind of agent persona that authored a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentType {
    CrisisSupport,
    TraumaSpecialist,
    Therapist,
}

impl AgentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentType::CrisisSupport => "crisis_support",
            AgentType::TraumaSpecialist => "trauma_specialist",
            AgentType::Therapist => "therapist",
        }
    }
}

/// Static response for one category.
#[derive(Debug, PartialEq, Eq)]
pub struct ResponseTemplate {
    /// Template identifier, stable across releases.
    pub key: &'static str,
    pub agent_type: AgentType,
    pub response: &'static str,
    pub immediate_actions: &'static [&'static str],
    pub resources: &'static [Resource],
    pub recommendations: &'static [&'static str],
    /// Confidence the persona reports for this template, as a percentage.
    pub confidence_score: u8,
}

impl ResponseTemplate {
    pub fn recommendations(&self) -> Vec<String> {
        self.recommendations.iter().map(|r| r.to_string()).collect()
    }

    pub fn immediate_actions(&self) -> Vec<String> {
        self.immediate_actions.iter().map(|r| r.to_string()).collect()
    }
}

pub const LIFELINE_988: Resource = Resource {
    name: "988 Suicide & Crisis Lifeline",
    contact: "988",
    availability: "24/7",
};

pub const CRISIS_TEXT_LINE: Resource = Resource {
    name: "Crisis Text Line",
    contact: "Text HOME to 741741",
    availability: "24/7",
};

pub const EMERGENCY_SERVICES: Resource = Resource {
    name: "Emergency Services",
    contact: "911",
    availability: "24/7",
};

pub const NAMI_HELPLINE: Resource = Resource {
    name: "NAMI Helpline",
    contact: "1-800-950-NAMI",
    availability: "M-F 10am-10pm ET",
};

pub const MENTAL_HEALTH_AMERICA: Resource = Resource {
    name: "Mental Health America",
    contact: "mhanational.org",
    availability: "Online",
};

pub const SAMHSA_HELPLINE: Resource = Resource {
    name: "SAMHSA National Helpline",
    contact: "1-800-662-4357",
    availability: "24/7",
};

static CRISIS: ResponseTemplate = ResponseTemplate {
    key: "crisis",
    agent_type: AgentType::CrisisSupport,
    response: "I'm really concerned about your safety right now. Your life matters, and you do not \
have to carry this by yourself.\n\n\
Please reach out right away:\n\
- Call or text 988 (Suicide & Crisis Lifeline), available 24/7\n\
- Text HOME to 741741 to reach the Crisis Text Line\n\
- Call 911 or go to the nearest emergency room if you are in immediate danger\n\n\
Can you contact one of them now? I'm staying right here with you.",
    immediate_actions: &[
        "Call 988 now",
        "Text HOME to 741741",
        "Go to the nearest emergency room",
        "Call 911 if in immediate danger",
        "Stay with someone you trust",
    ],
    resources: &[LIFELINE_988, CRISIS_TEXT_LINE, EMERGENCY_SERVICES],
    recommendations: &[
        "Contact emergency services immediately",
        "Reach out to a trusted friend or family member",
        "Remove any means of self-harm from your environment",
        "Stay in a safe, public place if possible",
    ],
    confidence_score: 95,
};

static ENHANCED_SUPPORT: ResponseTemplate = ResponseTemplate {
    key: "enhanced_support",
    agent_type: AgentType::Therapist,
    response: "It sounds like you are carrying a lot of pain right now, and I'm glad you told me. \
Feeling hopeless or trapped is exhausting, but these feelings can shift with support.\n\n\
If things start to feel unsafe, please call or text 988 at any time. In the meantime, is there \
someone you trust who could be with you today?",
    immediate_actions: &[
        "Reach out to a trusted person today",
        "Keep the 988 Lifeline number close",
        "Schedule time with a mental health professional",
    ],
    resources: &[
        LIFELINE_988,
        CRISIS_TEXT_LINE,
        EMERGENCY_SERVICES,
        NAMI_HELPLINE,
        MENTAL_HEALTH_AMERICA,
    ],
    recommendations: &[
        "Connect with a counselor or therapist this week",
        "Create a simple safety plan with people you can call",
        "Break the day into small, manageable steps",
        "Limit alcohol and other substances",
    ],
    confidence_score: 88,
};

static TRAUMA: ResponseTemplate = ResponseTemplate {
    key: "trauma",
    agent_type: AgentType::TraumaSpecialist,
    response: "What you went through sounds deeply painful, and your reactions make sense. \
Trauma can affect both body and mind, and none of it is your fault.\n\n\
We can go at whatever pace feels safe for you. What kind of support would help most right now?",
    immediate_actions: &[
        "Find a place where you feel physically safe",
        "Try a grounding exercise",
    ],
    resources: &[NAMI_HELPLINE, MENTAL_HEALTH_AMERICA, CRISIS_TEXT_LINE],
    recommendations: &[
        "Consider trauma-informed therapy",
        "Practice grounding techniques",
        "Connect with trauma support groups",
        "Focus on safety and self-care",
    ],
    confidence_score: 90,
};

static SAD: ResponseTemplate = ResponseTemplate {
    key: "sad",
    agent_type: AgentType::Therapist,
    response: "I can hear how heavy things feel for you right now, and that feeling is valid. \
Sadness and grief can color everything, but you are not alone with it.\n\n\
Reaching out took courage. What has been the hardest part of your day?",
    immediate_actions: &[],
    resources: &[NAMI_HELPLINE, MENTAL_HEALTH_AMERICA],
    recommendations: &[
        "Practice gentle self-compassion",
        "Try the 5-4-3-2-1 grounding technique",
        "Reach out to a trusted person in your support network",
        "Consider a brief walk outside if possible",
    ],
    confidence_score: 85,
};

static ANXIOUS: ResponseTemplate = ResponseTemplate {
    key: "anxious",
    agent_type: AgentType::Therapist,
    response: "That sounds really stressful. Anxiety is uncomfortable, but it is your body trying \
to protect you, and we can work on settling it together.\n\n\
Let's start with one slow breath: in for 4, hold for 4, out for 6. \
What thoughts are going through your mind right now?",
    immediate_actions: &["Take a few slow breaths"],
    resources: &[NAMI_HELPLINE, MENTAL_HEALTH_AMERICA],
    recommendations: &[
        "Practice deep breathing exercises",
        "Try progressive muscle relaxation",
        "Use the STOP technique (Stop, Take a breath, Observe, Proceed)",
        "Ground yourself using your five senses",
    ],
    confidence_score: 88,
};

static ANGRY: ResponseTemplate = ResponseTemplate {
    key: "angry",
    agent_type: AgentType::Therapist,
    response: "I can hear how frustrated and angry you are, and those feelings are understandable. \
Anger often shows up when something important to us has been threatened, and it can cover \
hurt or fear underneath.\n\n\
What do you think might be beneath this anger, and how have you been handling it so far?",
    immediate_actions: &[],
    resources: &[NAMI_HELPLINE, MENTAL_HEALTH_AMERICA],
    recommendations: &[
        "Practice anger management techniques",
        "Try physical exercise to release tension",
        "Consider assertiveness training",
        "Explore underlying emotions beneath the anger",
    ],
    confidence_score: 82,
};

static NEUTRAL: ResponseTemplate = ResponseTemplate {
    key: "neutral",
    agent_type: AgentType::Therapist,
    response: "Thank you for sharing that with me. I'm here to listen without judgment, \
whatever you are going through.\n\n\
What has been on your mind lately? Is there something you would like to talk about today?",
    immediate_actions: &[],
    resources: &[MENTAL_HEALTH_AMERICA],
    recommendations: &[
        "Continue self-reflection and awareness",
        "Consider journaling your thoughts and feelings",
        "Practice mindfulness and present-moment awareness",
        "Maintain regular self-care routines",
    ],
    confidence_score: 80,
};

impl Category {
    /// The template a category resolves to.
    pub fn template(&self) -> &'static ResponseTemplate {
        match self {
            Category::Crisis | Category::SelfHarm | Category::SubstanceRisk => &CRISIS,
            Category::Distress => &ENHANCED_SUPPORT,
            Category::Trauma => &TRAUMA,
            Category::Sadness => &SAD,
            Category::Anxiety => &ANXIOUS,
            Category::Anger => &ANGRY,
            Category::Neutral => &NEUTRAL,
        }
    }
}

/// Picks the template for a classification. A score at or above the attention threshold
/// always selects the crisis template, whatever the dominant category.
pub fn select(category: Category, risk_score: u8) -> &'static ResponseTemplate {
    if risk_score >= IMMEDIATE_ATTENTION_THRESHOLD {
        return &CRISIS;
    }
    category.template()
}

/// Resources attached to substance-related replies in addition to the crisis lines.
pub fn substance_resources() -> &'static [Resource] {
    &[SAMHSA_HELPLINE]
}
