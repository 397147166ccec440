//! Empathetic framing: a validating opener, a reflection of the feeling and a connection line.

use serde::{Deserialize, Serialize};

use super::keywords::Category;
use super::recommend::UserProfile;

pub const VALIDATION_STATEMENTS: &[&str] = &[
    "Your feelings are completely valid and understandable.",
    "It makes sense that you would feel this way given what you're going through.",
    "You're not alone in experiencing these emotions.",
    "Thank you for trusting me with these difficult feelings.",
];

const CONNECTION: &str =
    "I'm here with you in this moment, and I want to understand your experience better.";

/// Feeling named back to the person.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Feeling {
    Sad,
    Anxious,
    Angry,
    Hopeless,
}

impl Feeling {
    fn for_category(category: Category) -> Self {
        match category {
            Category::Crisis | Category::SelfHarm | Category::SubstanceRisk | Category::Distress => {
                Feeling::Hopeless
            }
            Category::Anxiety | Category::Trauma => Feeling::Anxious,
            Category::Anger => Feeling::Angry,
            Category::Sadness | Category::Neutral => Feeling::Sad,
        }
    }

    fn word(&self) -> &'static str {
        match self {
            Feeling::Sad => "sad",
            Feeling::Anxious => "anxious",
            Feeling::Angry => "angry",
            Feeling::Hopeless => "hopeless",
        }
    }

    fn opener(&self) -> &'static str {
        match self {
            Feeling::Sad => "I can hear the sadness in your words, and I want you to know that what you're feeling is completely valid.",
            Feeling::Anxious => "I can sense the anxiety you're experiencing, and that must feel overwhelming.",
            Feeling::Angry => "I can hear the frustration and anger in what you're sharing.",
            Feeling::Hopeless => "I hear how hopeless things feel right now, and that must be incredibly painful.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Empathy {
    pub empathy_response: String,
    pub validation_statements: Vec<String>,
    pub emotional_reflection: String,
    pub connection_building: String,
}

impl Empathy {
    pub fn for_category(category: Category, profile: &UserProfile) -> Self {
        let feeling = Feeling::for_category(category);
        let connection_building = match &profile.name {
            Some(name) => format!("{}, {}", name, CONNECTION),
            None => CONNECTION.to_string(),
        };

        Self {
            empathy_response: feeling.opener().to_string(),
            validation_statements: VALIDATION_STATEMENTS.iter().map(|s| s.to_string()).collect(),
            emotional_reflection: format!(
                "It sounds like you're feeling {} and that's weighing heavily on you.",
                feeling.word()
            ),
            connection_building,
        }
    }
}
