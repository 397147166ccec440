//! Therapeutic approach selection.

use serde::{Deserialize, Serialize};

use super::keywords::IMMEDIATE_ATTENTION_THRESHOLD;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TherapeuticApproach {
    CrisisIntervention,
    TraumaInformed,
    Cbt,
    Dbt,
    Humanistic,
}

const TRAUMA_CUES: &[&str] = &["trauma", "abuse", "ptsd", "flashback", "triggered"];
const THOUGHT_CUES: &[&str] = &[
    "think",
    "believe",
    "thoughts",
    "mind racing",
    "can't stop thinking",
];
const REGULATION_CUES: &[&str] = &[
    "overwhelmed",
    "overwhelming",
    "intense emotions",
    "can't control",
    "emotional",
];

impl TherapeuticApproach {
    /// Picks an approach for a normalized message and its risk score.
    pub fn select(normalized: &str, risk_score: u8) -> Self {
        let any = |cues: &[&str]| cues.iter().any(|c| normalized.contains(c));

        if risk_score >= IMMEDIATE_ATTENTION_THRESHOLD {
            TherapeuticApproach::CrisisIntervention
        } else if any(TRAUMA_CUES) {
            TherapeuticApproach::TraumaInformed
        } else if any(THOUGHT_CUES) {
            TherapeuticApproach::Cbt
        } else if any(REGULATION_CUES) {
            TherapeuticApproach::Dbt
        } else {
            TherapeuticApproach::Humanistic
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TherapeuticApproach::CrisisIntervention => "crisis_intervention",
            TherapeuticApproach::TraumaInformed => "trauma_informed",
            TherapeuticApproach::Cbt => "cbt",
            TherapeuticApproach::Dbt => "dbt",
            TherapeuticApproach::Humanistic => "humanistic",
        }
    }

    pub fn techniques(&self) -> &'static [&'static str] {
        match self {
            TherapeuticApproach::CrisisIntervention => &[
                "Safety assessment",
                "Connection to crisis resources",
                "Means restriction",
            ],
            TherapeuticApproach::TraumaInformed => &[
                "Safety establishment",
                "Grounding techniques",
                "Trauma-informed care principles",
            ],
            TherapeuticApproach::Cbt => &[
                "Thought challenging",
                "Cognitive restructuring",
                "Evidence examination",
            ],
            TherapeuticApproach::Dbt => &[
                "TIPP skills",
                "Distress tolerance",
                "Emotion regulation",
                "Mindfulness",
            ],
            TherapeuticApproach::Humanistic => &[
                "Active listening",
                "Unconditional positive regard",
                "Empathetic reflection",
            ],
        }
    }

    pub fn follow_up_questions(&self) -> &'static [&'static str] {
        match self {
            TherapeuticApproach::CrisisIntervention => &[
                "Are you safe right now?",
                "Is there someone who can stay with you?",
                "Can you call 988 while we keep talking?",
            ],
            TherapeuticApproach::TraumaInformed => &[
                "Do you feel safe where you are right now?",
                "What helps you feel grounded and present?",
                "Would you like to try a grounding exercise together?",
            ],
            TherapeuticApproach::Cbt => &[
                "What thoughts are going through your mind right now?",
                "How strong is that thought on a scale of 1-10?",
                "What would you tell a friend who had the same thought?",
            ],
            TherapeuticApproach::Dbt => &[
                "Which emotion feels strongest right now?",
                "How intense is it on a scale of 1-10?",
                "What usually helps you feel steadier?",
            ],
            TherapeuticApproach::Humanistic => &[
                "How does it feel to put this into words?",
                "What feels most important to explore right now?",
                "What else would you like me to know?",
            ],
        }
    }
}
