//! Keyword catalogue for risk and mood classification.
//!
//! The catalogue is built once on first use and never mutated afterwards. Categories are stored
//! in priority order: when two matched categories share a base severity, the one listed first
//! becomes the dominant category.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Risk score at or above which a message requires immediate attention.
pub const IMMEDIATE_ATTENTION_THRESHOLD: u8 = 8;

/// Upper bound of the aggregate risk score.
pub const MAX_RISK_SCORE: u8 = 10;

/// Classification category, declared in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Suicidal ideation or intent
    #[serde(rename = "crisis")]
    Crisis,
    /// Active or recent self-harm
    #[serde(rename = "self_harm")]
    SelfHarm,
    /// Overdose or dangerous substance use
    #[serde(rename = "substance_risk")]
    SubstanceRisk,
    /// Hopelessness and despair (medium risk)
    #[serde(rename = "distress")]
    Distress,
    #[serde(rename = "traumatized")]
    Trauma,
    #[serde(rename = "sad")]
    Sadness,
    #[serde(rename = "anxious")]
    Anxiety,
    #[serde(rename = "angry")]
    Anger,
    /// Nothing matched
    #[serde(rename = "neutral")]
    Neutral,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Category {
    /// Every category in priority order.
    pub const ALL: [Category; 9] = [
        Category::Crisis,
        Category::SelfHarm,
        Category::SubstanceRisk,
        Category::Distress,
        Category::Trauma,
        Category::Sadness,
        Category::Anxiety,
        Category::Anger,
        Category::Neutral,
    ];

    /// Wire label, also used as the persisted emotional state.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Crisis => "crisis",
            Category::SelfHarm => "self_harm",
            Category::SubstanceRisk => "substance_risk",
            Category::Distress => "distress",
            Category::Trauma => "traumatized",
            Category::Sadness => "sad",
            Category::Anxiety => "anxious",
            Category::Anger => "angry",
            Category::Neutral => "neutral",
        }
    }

    /// Parses a label back into a category. Unknown labels fall back to `Neutral`.
    pub fn from_label(label: &str) -> Category {
        Category::ALL
            .into_iter()
            .find(|c| c.label() == label.trim())
            .unwrap_or(Category::Neutral)
    }

    /// Categories that always carry a crisis-level base severity.
    pub fn is_acute(&self) -> bool {
        matches!(
            self,
            Category::Crisis | Category::SelfHarm | Category::SubstanceRisk
        )
    }
}

/// A named keyword list with its base severity.
#[derive(Debug, Clone)]
pub struct KeywordCategory {
    pub category: Category,
    pub keywords: &'static [&'static str],
    pub base_severity: u8,
}

/// Kind of contextual modifier that raises the risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierKind {
    /// Mentions of a concrete means
    MethodSpecific,
    /// Time pressure ("tonight", "right now")
    Urgency,
    /// Social isolation
    Isolation,
}

impl ModifierKind {
    /// Increment added to the risk score when at least one phrase of this kind matches.
    pub fn increment(&self) -> u8 {
        match self {
            ModifierKind::MethodSpecific => 3,
            ModifierKind::Urgency => 2,
            ModifierKind::Isolation => 1,
        }
    }
}

/// A modifier phrase group.
#[derive(Debug, Clone)]
pub struct Modifier {
    pub kind: ModifierKind,
    pub phrases: &'static [&'static str],
}

/// Frozen keyword catalogue shared by every classifier.
#[derive(Debug)]
pub struct KeywordCatalog {
    categories: Vec<KeywordCategory>,
    modifiers: Vec<Modifier>,
}

impl KeywordCatalog {
    /// Keyword categories in priority order. `Neutral` is not listed: it has no keywords.
    pub fn categories(&self) -> &[KeywordCategory] {
        &self.categories
    }

    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    /// Base severity of a category (0 for `Neutral`).
    pub fn severity_of(&self, category: Category) -> u8 {
        self.categories
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.base_severity)
            .unwrap_or(0)
    }
}

const CRISIS_KEYWORDS: &[&str] = &[
    "kill myself",
    "killing myself",
    "suicide",
    "suicidal",
    "end it all",
    "want to die",
    "better off dead",
    "can't go on",
    "no point living",
    "not worth living",
    "end my life",
    "go to sleep and not wake up",
    "nobody would miss me",
    "burden to everyone",
    "hang myself",
    "shoot myself",
    "jump off a bridge",
    "jump in front of",
];

const SELF_HARM_KEYWORDS: &[&str] = &[
    "hurt myself",
    "self harm",
    "self-harm",
    "cut myself",
    "cutting myself",
    "cut deeper",
    "cutting deeper",
    "burn myself",
    "razor blade",
    "cut with a blade",
    "cut with a razor",
];

const SUBSTANCE_KEYWORDS: &[&str] = &[
    "overdose",
    "too many pills",
    "pills saved",
    "saved up pills",
    "drinking heavily",
    "mixed alcohol",
];

const DISTRESS_KEYWORDS: &[&str] = &[
    "hopeless",
    "worthless",
    "burden",
    "give up",
    "giving up",
    "can't take it",
    "trapped",
    "desperate",
    "no way out",
    "end the pain",
    "can't cope",
    "breaking point",
    "nothing matters",
];

const TRAUMA_KEYWORDS: &[&str] = &[
    "trauma",
    "assault",
    "was attacked",
    "got attacked",
    "ptsd",
    "flashback",
    "nightmares",
    "since my deployment",
    "after my deployment",
    "in combat",
    "abuse",
    "violence",
    "bruises",
    "feel triggered",
    "got triggered",
];

const SADNESS_KEYWORDS: &[&str] = &[
    "i'm sad",
    "i am sad",
    "feel sad",
    "feeling sad",
    "so sad",
    "sadness",
    "depressed",
    "depression",
    "feel empty",
    "feeling empty",
    "lonely",
    "feel numb",
    "feeling numb",
    "went numb",
    "crying",
    "grief",
    "grieving",
    "devastated",
    "funeral",
    "heartbroken",
    "lost interest",
    "no energy",
    "can't sleep",
    "feel isolated",
    "feeling isolated",
];

const ANXIETY_KEYWORDS: &[&str] = &[
    "anxious",
    "anxiety",
    "worried",
    "worrying",
    "panic attack",
    "panicking",
    "panicked",
    "scared",
    "nervous",
    "stressed",
    "overwhelm",
    "terrified",
    "heart racing",
    "heart races",
    "can't breathe",
    "restless",
    "on edge",
];

const ANGER_KEYWORDS: &[&str] = &[
    "angry",
    "furious",
    "irritated",
    "frustrated",
    "in a rage",
    "enraged",
    "annoyed",
    "pissed off",
    "so mad",
    "mad at",
    "resentful",
];

// Phrases rather than bare nouns: substring matching would find "gun" in "begun" and
// "rope" in "europe".
const METHOD_PHRASES: &[&str] = &[
    "my pills",
    "the pills",
    "sleeping pills",
    "off a bridge",
    "a gun",
    "my gun",
    "the gun",
    "a rope",
    "the rope",
    "a knife",
    "my knife",
    "the knife",
];
const URGENCY_PHRASES: &[&str] = &["right now", "today", "tonight", "soon", "planning to"];
const ISOLATION_PHRASES: &[&str] = &["alone", "nobody", "no one cares", "abandoned"];

static CATALOG: LazyLock<KeywordCatalog> = LazyLock::new(|| KeywordCatalog {
    categories: vec![
        KeywordCategory {
            category: Category::Crisis,
            keywords: CRISIS_KEYWORDS,
            base_severity: 9,
        },
        KeywordCategory {
            category: Category::SelfHarm,
            keywords: SELF_HARM_KEYWORDS,
            base_severity: 9,
        },
        KeywordCategory {
            category: Category::SubstanceRisk,
            keywords: SUBSTANCE_KEYWORDS,
            base_severity: 8,
        },
        KeywordCategory {
            category: Category::Distress,
            keywords: DISTRESS_KEYWORDS,
            base_severity: 6,
        },
        KeywordCategory {
            category: Category::Trauma,
            keywords: TRAUMA_KEYWORDS,
            base_severity: 5,
        },
        KeywordCategory {
            category: Category::Sadness,
            keywords: SADNESS_KEYWORDS,
            base_severity: 4,
        },
        KeywordCategory {
            category: Category::Anxiety,
            keywords: ANXIETY_KEYWORDS,
            base_severity: 4,
        },
        KeywordCategory {
            category: Category::Anger,
            keywords: ANGER_KEYWORDS,
            base_severity: 3,
        },
    ],
    modifiers: vec![
        Modifier {
            kind: ModifierKind::MethodSpecific,
            phrases: METHOD_PHRASES,
        },
        Modifier {
            kind: ModifierKind::Urgency,
            phrases: URGENCY_PHRASES,
        },
        Modifier {
            kind: ModifierKind::Isolation,
            phrases: ISOLATION_PHRASES,
        },
    ],
});

/// Returns the process-wide keyword catalogue.
pub fn catalog() -> &'static KeywordCatalog {
    &CATALOG
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keywords_are_unique_across_categories() {
        let mut seen = HashSet::new();
        for category in catalog().categories() {
            for keyword in category.keywords {
                assert!(seen.insert(*keyword), "duplicate keyword '{}'", keyword);
            }
        }
    }

    #[test]
    fn test_keywords_are_lowercase_and_non_empty() {
        for category in catalog().categories() {
            for keyword in category.keywords {
                assert!(!keyword.trim().is_empty());
                assert_eq!(*keyword, keyword.to_lowercase());
            }
        }
    }

    #[test]
    fn test_priority_order_matches_enum_order() {
        let listed: Vec<Category> = catalog().categories().iter().map(|c| c.category).collect();
        let expected: Vec<Category> = Category::ALL
            .into_iter()
            .filter(|c| *c != Category::Neutral)
            .collect();
        assert_eq!(listed, expected);
    }

    #[test]
    fn test_severities_are_non_increasing() {
        let severities: Vec<u8> = catalog()
            .categories()
            .iter()
            .map(|c| c.base_severity)
            .collect();
        assert!(severities.windows(2).all(|w| w[0] >= w[1]));
        assert!(severities.iter().all(|s| *s <= MAX_RISK_SCORE));
    }

    #[test]
    fn test_label_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_label(category.label()), category);
        }
        assert_eq!(Category::from_label("unknown-mood"), Category::Neutral);
        assert_eq!(Category::from_label(""), Category::Neutral);
    }

    #[test]
    fn test_acute_categories_reach_threshold() {
        for category in catalog().categories() {
            if category.category.is_acute() {
                assert!(category.base_severity >= IMMEDIATE_ATTENTION_THRESHOLD);
            } else {
                assert!(category.base_severity < IMMEDIATE_ATTENTION_THRESHOLD);
            }
        }
    }
}
