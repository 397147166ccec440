//! Mood analysis: indicator scoring, emotional phrase extraction and trend over a session.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use super::keywords::Category;
use super::scanner::normalize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Depressed,
    Anxious,
    Angry,
    Happy,
    Neutral,
}

impl Mood {
    /// Scoring order; ties resolve to the earlier mood.
    pub const ALL: [Mood; 5] = [
        Mood::Depressed,
        Mood::Anxious,
        Mood::Angry,
        Mood::Happy,
        Mood::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Depressed => "depressed",
            Mood::Anxious => "anxious",
            Mood::Angry => "angry",
            Mood::Happy => "happy",
            Mood::Neutral => "neutral",
        }
    }

    fn indicators(&self) -> &'static [&'static str] {
        match self {
            Mood::Depressed => &["sad", "hopeless", "empty", "numb", "worthless", "despair"],
            Mood::Anxious => &["worried", "nervous", "panic", "scared", "overwhelmed", "restless"],
            Mood::Angry => &["angry", "furious", "irritated", "frustrated", "rage", "annoyed"],
            Mood::Happy => &["joy", "excited", "content", "pleased", "cheerful", "optimistic", "happy"],
            Mood::Neutral => &["okay", "fine", "alright", "normal", "stable"],
        }
    }

    /// Maps a stored emotional state to a mood. Accepts mood names and category labels.
    pub fn from_state(state: &str) -> Mood {
        match state.trim() {
            "depressed" => Mood::Depressed,
            "anxious" => Mood::Anxious,
            "angry" => Mood::Angry,
            "happy" => Mood::Happy,
            other => match Category::from_label(other) {
                Category::Crisis
                | Category::SelfHarm
                | Category::SubstanceRisk
                | Category::Distress
                | Category::Sadness => Mood::Depressed,
                Category::Trauma | Category::Anxiety => Mood::Anxious,
                Category::Anger => Mood::Angry,
                Category::Neutral => Mood::Neutral,
            },
        }
    }

    /// +1 for happy, 0 for neutral, -1 otherwise.
    pub fn valence(&self) -> i8 {
        match self {
            Mood::Happy => 1,
            Mood::Neutral => 0,
            Mood::Depressed | Mood::Anxious | Mood::Angry => -1,
        }
    }

    fn is_concerning(&self) -> bool {
        matches!(self, Mood::Depressed | Mood::Anxious)
    }

    fn is_positive(&self) -> bool {
        matches!(self, Mood::Happy | Mood::Neutral)
    }
}

/// Direction of mood across the previous messages of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodTrend {
    NewSession,
    InsufficientData,
    ConcerningDecline,
    PositiveTrend,
    Variable,
}

impl MoodTrend {
    pub fn from_history(previous: &[Mood]) -> Self {
        if previous.is_empty() {
            return MoodTrend::NewSession;
        }
        if previous.len() < 2 {
            return MoodTrend::InsufficientData;
        }
        let recent = &previous[previous.len().saturating_sub(3)..];
        if recent.iter().all(Mood::is_concerning) {
            MoodTrend::ConcerningDecline
        } else if recent.iter().all(Mood::is_positive) {
            MoodTrend::PositiveTrend
        } else {
            MoodTrend::Variable
        }
    }
}

/// Valence direction from the first half of a session to the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValenceTrend {
    InsufficientData,
    Improving,
    Declining,
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stability {
    Unknown,
    Stable,
    Moderate,
    Volatile,
}

/// How mood moved over a whole session, current message included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionalProgression {
    pub trend: ValenceTrend,
    pub emotional_variety: usize,
    pub dominant_emotion: Option<Mood>,
    pub stability: Stability,
    pub valence_progression: Vec<i8>,
}

/// Half-to-half valence change needed to call a direction.
const TREND_MARGIN: f32 = 0.2;

impl EmotionalProgression {
    /// `moods` is the session in order, oldest first.
    pub fn from_moods(moods: &[Mood]) -> Self {
        let valence: Vec<i8> = moods.iter().map(Mood::valence).collect();

        let mut distinct: Vec<Mood> = Vec::new();
        for mood in moods {
            if !distinct.contains(mood) {
                distinct.push(*mood);
            }
        }
        // most frequent; ties go to the mood seen first
        let dominant_emotion = distinct.iter().copied().reduce(|best, mood| {
            let count = |m: Mood| moods.iter().filter(|x| **x == m).count();
            if count(mood) > count(best) {
                mood
            } else {
                best
            }
        });

        Self {
            trend: valence_trend(&valence),
            emotional_variety: distinct.len(),
            dominant_emotion,
            stability: stability(moods),
            valence_progression: valence,
        }
    }
}

fn valence_trend(valence: &[i8]) -> ValenceTrend {
    if valence.len() < 3 {
        return ValenceTrend::InsufficientData;
    }
    let (early, late) = valence.split_at(valence.len() / 2);
    let average = |half: &[i8]| half.iter().map(|v| f32::from(*v)).sum::<f32>() / half.len() as f32;
    let (early, late) = (average(early), average(late));

    if late > early + TREND_MARGIN {
        ValenceTrend::Improving
    } else if late < early - TREND_MARGIN {
        ValenceTrend::Declining
    } else {
        ValenceTrend::Stable
    }
}

fn stability(moods: &[Mood]) -> Stability {
    if moods.len() < 3 {
        return Stability::Unknown;
    }
    let changes = moods.windows(2).filter(|pair| pair[0] != pair[1]).count();
    let rate = changes as f32 / (moods.len() - 1) as f32;
    if rate < 0.3 {
        Stability::Stable
    } else if rate < 0.6 {
        Stability::Moderate
    } else {
        Stability::Volatile
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodScore {
    pub mood: Mood,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodReport {
    pub primary_mood: Mood,
    /// 0-10
    pub intensity: u8,
    pub scores: Vec<MoodScore>,
    pub emotional_indicators: Vec<String>,
    pub trend: MoodTrend,
}

// NOTE: expect() is fine here, the patterns are literals
static EMOTIONAL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"\bi feel (?:so |really |very )?(\w+)").expect("Invalid regex: i feel pattern"),
        Regex::new(r"\bi am (?:so |really |very )?(\w+)").expect("Invalid regex: i am pattern"),
        Regex::new(r"\bi'm (?:so |really |very )?(\w+)").expect("Invalid regex: i'm pattern"),
        Regex::new(r"\b(?:feeling|been) (?:so |really |very )?(\w+)")
            .expect("Invalid regex: feeling pattern"),
    ]
});

/// Words captured after "i feel"/"i am"/"feeling", in pattern order.
pub fn extract_emotional_phrases(text: &str) -> Vec<String> {
    let normalized = normalize(text);
    EMOTIONAL_PATTERNS
        .iter()
        .flat_map(|re| {
            re.captures_iter(&normalized)
                .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Scores a message against the mood indicators and places it in the session trend.
pub fn analyze(text: &str, previous: &[Mood]) -> MoodReport {
    let normalized = normalize(text);

    let scores: Vec<MoodScore> = Mood::ALL
        .iter()
        .map(|mood| MoodScore {
            mood: *mood,
            score: mood
                .indicators()
                .iter()
                .filter(|kw| normalized.contains(*kw))
                .count() as u32,
        })
        .collect();

    let best = scores
        .iter()
        .filter(|s| s.score > 0)
        .reduce(|best, s| if s.score > best.score { s } else { best });

    let (primary_mood, top) = match best {
        Some(s) => (s.mood, s.score),
        None => (Mood::Neutral, 0),
    };

    MoodReport {
        primary_mood,
        intensity: (top * 2).min(10) as u8,
        scores,
        emotional_indicators: extract_emotional_phrases(text),
        trend: MoodTrend::from_history(previous),
    }
}
