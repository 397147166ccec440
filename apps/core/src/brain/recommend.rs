//! Care plan: coping strategies, ongoing interventions and goals for a message.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::keywords::IMMEDIATE_ATTENTION_THRESHOLD;
use super::mood::Mood;

/// Caller-supplied details about the person being supported.
///
/// Parsed leniently from free-form JSON. Unknown fields are ignored and malformed ones dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: Option<String>,
    /// Goals the person set for themselves, in their own words.
    pub goals: Vec<String>,
}

impl UserProfile {
    pub fn named(name: &str) -> Self {
        Self {
            name: non_blank(name),
            goals: Vec::new(),
        }
    }

    /// Reads `name` (or `preferredName`/`preferred_name`) and a `goals` array of strings.
    pub fn from_value(value: Option<&Value>) -> Self {
        let Some(map) = value.and_then(Value::as_object) else {
            return Self::default();
        };

        let name = ["preferredName", "preferred_name", "name"]
            .iter()
            .filter_map(|key| map.get(*key).and_then(Value::as_str))
            .find_map(non_blank);

        let goals = map
            .get("goals")
            .and_then(Value::as_array)
            .map(|goals| goals.iter().filter_map(Value::as_str).filter_map(non_blank).collect())
            .unwrap_or_default();

        Self { name, goals }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.goals.is_empty()
    }
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

struct Interventions {
    immediate: &'static [&'static str],
    ongoing: &'static [&'static str],
    goals: &'static [&'static str],
}

const DEPRESSED: Interventions = Interventions {
    immediate: &[
        "Practice gentle self-compassion and speak to yourself as you would a good friend",
        "Try the 5-4-3-2-1 grounding technique: name 5 things you see, 4 you can touch, 3 you hear, 2 you smell, 1 you taste",
        "Take a brief walk outside if possible, even 5 minutes can help",
        "Reach out to one trusted person in your support network",
    ],
    ongoing: &[
        "Consider cognitive behavioral therapy techniques to challenge negative thought patterns",
        "Establish a daily routine with small, achievable goals",
        "Practice mindfulness meditation for 10 minutes daily",
        "Engage in pleasurable activities, even if they don't feel enjoyable right now",
    ],
    goals: &[
        "Increase daily pleasant activities",
        "Challenge negative thought patterns",
        "Build social connections",
    ],
};

const ANXIOUS: Interventions = Interventions {
    immediate: &[
        "Practice box breathing: inhale for 4, hold for 4, exhale for 4, hold for 4",
        "Use progressive muscle relaxation: tense and release each muscle group",
        "Try the STOP technique: Stop, Take a breath, Observe your thoughts and feelings, Proceed mindfully",
        "Ground yourself by focusing on your physical senses",
    ],
    ongoing: &[
        "Challenge anxious thoughts with evidence-based questioning",
        "Limit caffeine and practice good sleep hygiene",
        "Regular exercise, especially yoga or tai chi",
        "Practice exposure therapy gradually for specific fears",
    ],
    goals: &[
        "Develop anxiety management skills",
        "Practice exposure exercises gradually",
        "Build confidence in coping abilities",
    ],
};

const ANGRY: Interventions = Interventions {
    immediate: &[
        "Take slow, deep breaths to activate your parasympathetic nervous system",
        "Step away from the trigger situation if possible",
        "Try progressive muscle relaxation to release physical tension",
        "Use 'I' statements to express your feelings constructively",
    ],
    ongoing: &[
        "Practice anger management techniques like time-outs",
        "Identify underlying emotions beneath the anger",
        "Regular physical exercise to release built-up tension",
        "Learn assertiveness skills to communicate needs effectively",
    ],
    goals: &[
        "Learn healthy anger expression",
        "Identify anger triggers",
        "Practice stress management",
    ],
};

const CRISIS_STEPS: &[&str] = &[
    "Remove any means of self-harm from your environment",
    "Stay in a safe, populated area",
    "Contact emergency services: 988 (Suicide & Crisis Lifeline)",
    "Reach out to a trusted friend, family member, or mental health professional immediately",
];

pub const SELF_CARE_ACTIVITIES: &[&str] = &[
    "Maintain regular sleep schedule",
    "Practice daily gratitude journaling",
    "Engage in creative expression",
    "Connect with nature when possible",
];

const ONGOING_LIMIT: usize = 3;

fn interventions_for(mood: Mood) -> &'static Interventions {
    match mood {
        Mood::Anxious => &ANXIOUS,
        Mood::Angry => &ANGRY,
        Mood::Depressed | Mood::Happy | Mood::Neutral => &DEPRESSED,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarePlan {
    /// Crisis safety steps at or above the attention threshold, otherwise mood-specific coping.
    pub immediate_strategies: Vec<String>,
    pub ongoing_interventions: Vec<String>,
    pub self_care_activities: Vec<String>,
    /// Mood goals followed by the person's own goals, without duplicates.
    pub follow_up_goals: Vec<String>,
}

impl CarePlan {
    pub fn build(mood: Mood, risk_score: u8, profile: &UserProfile) -> Self {
        let interventions = interventions_for(mood);
        let immediate = if risk_score >= IMMEDIATE_ATTENTION_THRESHOLD {
            CRISIS_STEPS
        } else {
            interventions.immediate
        };

        let mut follow_up_goals: Vec<String> =
            interventions.goals.iter().map(|g| g.to_string()).collect();
        for goal in &profile.goals {
            if !follow_up_goals.iter().any(|g| g.eq_ignore_ascii_case(goal)) {
                follow_up_goals.push(goal.clone());
            }
        }

        Self {
            immediate_strategies: to_strings(immediate),
            ongoing_interventions: to_strings(&interventions.ongoing[..ONGOING_LIMIT]),
            self_care_activities: to_strings(SELF_CARE_ACTIVITIES),
            follow_up_goals,
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profile_from_value() {
        let profile = UserProfile::from_value(Some(&json!({
            "user_id": "u-1",
            "name": "  Sam ",
            "goals": ["Sleep before midnight", "", 7]
        })));
        assert_eq!(profile.name.as_deref(), Some("Sam"));
        assert_eq!(profile.goals, vec!["Sleep before midnight"]);

        let preferred = UserProfile::from_value(Some(&json!({"name": "Samuel", "preferredName": "Sam"})));
        assert_eq!(preferred.name.as_deref(), Some("Sam"));
    }

    #[test]
    fn test_profile_from_malformed_value() {
        assert!(UserProfile::from_value(None).is_empty());
        assert!(UserProfile::from_value(Some(&json!("Sam"))).is_empty());
        assert!(UserProfile::from_value(Some(&json!({"name": 3, "goals": "run"}))).is_empty());
        assert!(UserProfile::named("   ").is_empty());
    }

    #[test]
    fn test_plan_follows_mood() {
        let plan = CarePlan::build(Mood::Anxious, 4, &UserProfile::default());
        assert!(plan.immediate_strategies[0].starts_with("Practice box breathing"));
        assert_eq!(plan.ongoing_interventions.len(), 3);
        assert_eq!(plan.follow_up_goals[0], "Develop anxiety management skills");
        assert_eq!(plan.self_care_activities.len(), 4);

        let plan = CarePlan::build(Mood::Angry, 3, &UserProfile::default());
        assert_eq!(plan.follow_up_goals[0], "Learn healthy anger expression");
    }

    #[test]
    fn test_neutral_uses_depression_plan() {
        let plan = CarePlan::build(Mood::Neutral, 0, &UserProfile::default());
        assert_eq!(plan.follow_up_goals, to_strings(DEPRESSED.goals));
    }

    #[test]
    fn test_high_risk_gets_crisis_steps() {
        let plan = CarePlan::build(Mood::Depressed, 9, &UserProfile::default());
        assert_eq!(plan.immediate_strategies, to_strings(CRISIS_STEPS));
        // ongoing work still follows the mood
        assert_eq!(plan.ongoing_interventions, to_strings(&DEPRESSED.ongoing[..3]));
    }

    #[test]
    fn test_profile_goals_are_appended_once() {
        let profile = UserProfile {
            name: None,
            goals: vec![
                "build social connections".to_string(),
                "Call my sister weekly".to_string(),
            ],
        };
        let plan = CarePlan::build(Mood::Depressed, 4, &profile);
        assert_eq!(
            plan.follow_up_goals,
            vec![
                "Increase daily pleasant activities",
                "Challenge negative thought patterns",
                "Build social connections",
                "Call my sister weekly",
            ]
        );
    }
}
