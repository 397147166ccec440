//! Session insights: themes and progress across the earlier messages of a session.

use serde::{Deserialize, Serialize};

use super::scanner::normalize;

pub const FIRST_SESSION_THEME: &str = "First session - establishing rapport";
pub const DEFAULT_THEME: &str = "General mental health support";

const THEMES: &[(&str, &[&str])] = &[
    (
        "Relationship Issues",
        &["relationship", "partner", "marriage", "boyfriend", "girlfriend"],
    ),
    ("Work Stress", &["work", "job", "boss", "career", "workplace"]),
    (
        "Family Problems",
        &["family", "parents", "mother", "father", "siblings"],
    ),
    (
        "Self Esteem",
        &["worthless", "self-worth", "confidence", "self-doubt"],
    ),
    ("Trauma", &["trauma", "abuse", "ptsd", "flashback", "memories"]),
];

const FOLLOW_UP: &[&str] = &[
    "Continue building therapeutic rapport",
    "Explore coping strategies effectiveness",
    "Check in on homework assignments",
    "Review progress toward goals",
];
const REASSESSMENT: &str = "Consider goal reassessment and treatment planning";

const EARLY_GOALS: &[&str] = &[
    "Establish therapeutic relationship",
    "Complete comprehensive assessment",
    "Identify primary concerns and goals",
];
const WORKING_GOALS: &[&str] = &[
    "Develop effective coping strategies",
    "Improve emotional regulation",
    "Build resilience and self-efficacy",
    "Enhance support system utilization",
];

/// Earlier turns after which the session is considered established.
const ESTABLISHED_AFTER: usize = 5;
/// Earlier turns needed before goals move past assessment.
const WORKING_PHASE_AT: usize = 3;

const IMPROVEMENT_WORDS: &[&str] = &["better", "improving", "hope", "positive", "progress"];
const DECLINE_WORDS: &[&str] = &["worse", "hopeless", "giving up", "can't cope"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    InitialAssessment,
    ShowingImprovement,
    NeedsAdditionalSupport,
    Stable,
}

impl ProgressStatus {
    pub fn describe(&self) -> &'static str {
        match self {
            ProgressStatus::InitialAssessment => "Initial assessment phase",
            ProgressStatus::ShowingImprovement => "Showing improvement",
            ProgressStatus::NeedsAdditionalSupport => "May need additional support",
            ProgressStatus::Stable => "Stable, continuing work",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementLevel {
    Building,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInsights {
    pub session_number: usize,
    pub recurring_themes: Vec<String>,
    pub progress: ProgressStatus,
    /// 3 (declining), 5 (neutral) or 7 (improving)
    pub progress_score: u8,
    pub summary: String,
    pub engagement_level: EngagementLevel,
    /// Suggestions for the next session.
    pub follow_up: Vec<String>,
    pub therapeutic_goals: Vec<String>,
}

impl SessionInsights {
    /// Builds insights from the earlier user messages of the session, oldest first.
    pub fn from_history(history: &[String], current_message: &str) -> Self {
        let normalized: Vec<String> = history.iter().map(|m| normalize(m)).collect();
        let (progress, progress_score) = assess_progress(&normalized);

        Self {
            session_number: history.len() + 1,
            recurring_themes: identify_themes(&normalized),
            progress,
            progress_score,
            summary: summarize(history.len(), current_message),
            engagement_level: if history.len() > ESTABLISHED_AFTER {
                EngagementLevel::High
            } else {
                EngagementLevel::Building
            },
            follow_up: suggest_follow_up(history.len()),
            therapeutic_goals: track_goals(history.len()),
        }
    }
}

fn identify_themes(history: &[String]) -> Vec<String> {
    if history.is_empty() {
        return vec![FIRST_SESSION_THEME.to_string()];
    }

    let themes: Vec<String> = THEMES
        .iter()
        .filter(|(_, cues)| history.iter().any(|m| cues.iter().any(|c| m.contains(c))))
        .map(|(name, _)| name.to_string())
        .collect();

    if themes.is_empty() {
        vec![DEFAULT_THEME.to_string()]
    } else {
        themes
    }
}

fn assess_progress(history: &[String]) -> (ProgressStatus, u8) {
    if history.len() < 2 {
        return (ProgressStatus::InitialAssessment, 5);
    }

    let recent = &history[history.len().saturating_sub(3)..];
    let count = |words: &[&str]| -> usize {
        recent
            .iter()
            .map(|m| words.iter().filter(|w| m.contains(*w)).count())
            .sum()
    };
    let improvement = count(IMPROVEMENT_WORDS);
    let decline = count(DECLINE_WORDS);

    match improvement.cmp(&decline) {
        std::cmp::Ordering::Greater => (ProgressStatus::ShowingImprovement, 7),
        std::cmp::Ordering::Less => (ProgressStatus::NeedsAdditionalSupport, 3),
        std::cmp::Ordering::Equal => (ProgressStatus::Stable, 5),
    }
}

fn suggest_follow_up(previous: usize) -> Vec<String> {
    let mut suggestions: Vec<String> = FOLLOW_UP.iter().map(|s| s.to_string()).collect();
    if previous > ESTABLISHED_AFTER {
        suggestions.push(REASSESSMENT.to_string());
    }
    suggestions
}

fn track_goals(previous: usize) -> Vec<String> {
    let goals = if previous < WORKING_PHASE_AT {
        EARLY_GOALS
    } else {
        WORKING_GOALS
    };
    goals.iter().map(|s| s.to_string()).collect()
}

fn summarize(previous: usize, current_message: &str) -> String {
    let focus: String = current_message.chars().take(100).collect();
    if previous == 0 {
        format!("Initial session. Client shared: {}", focus)
    } else {
        format!("Session {}. Current focus: {}", previous + 1, focus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(messages: &[&str]) -> Vec<String> {
        messages.iter().map(|m| m.to_string()).collect()
    }

    #[test]
    fn test_first_session() {
        let insights = SessionInsights::from_history(&[], "hello");
        assert_eq!(insights.session_number, 1);
        assert_eq!(insights.recurring_themes, vec![FIRST_SESSION_THEME]);
        assert_eq!(insights.progress, ProgressStatus::InitialAssessment);
        assert!(insights.summary.starts_with("Initial session"));
    }

    #[test]
    fn test_themes_detected() {
        let insights = SessionInsights::from_history(
            &history(&["My boss yelled at me", "My partner left"]),
            "still here",
        );
        assert_eq!(
            insights.recurring_themes,
            vec!["Relationship Issues", "Work Stress"]
        );
        assert_eq!(insights.session_number, 3);
    }

    #[test]
    fn test_default_theme() {
        let insights = SessionInsights::from_history(&history(&["rainy day"]), "ok");
        assert_eq!(insights.recurring_themes, vec![DEFAULT_THEME]);
    }

    #[test]
    fn test_progress_uses_last_three_messages() {
        let insights = SessionInsights::from_history(
            &history(&["worse", "worse", "feeling better", "some hope", "more progress"]),
            "thanks",
        );
        assert_eq!(insights.progress, ProgressStatus::ShowingImprovement);
        assert_eq!(insights.progress_score, 7);

        let insights =
            SessionInsights::from_history(&history(&["I'm hopeless", "giving up"]), "..");
        assert_eq!(insights.progress, ProgressStatus::NeedsAdditionalSupport);
    }

    #[test]
    fn test_follow_up_adds_reassessment_for_long_sessions() {
        let five = history(&["a"; 5]);
        let insights = SessionInsights::from_history(&five, "b");
        assert_eq!(insights.follow_up.len(), 4);
        assert_eq!(insights.engagement_level, EngagementLevel::Building);

        let six = history(&["a"; 6]);
        let insights = SessionInsights::from_history(&six, "b");
        assert_eq!(insights.follow_up.last().map(String::as_str), Some(REASSESSMENT));
        assert_eq!(insights.engagement_level, EngagementLevel::High);
    }

    #[test]
    fn test_goals_move_past_assessment_at_three_turns() {
        let insights = SessionInsights::from_history(&history(&["a", "b"]), "c");
        assert_eq!(insights.therapeutic_goals[0], "Establish therapeutic relationship");

        let insights = SessionInsights::from_history(&history(&["a", "b", "c"]), "d");
        assert_eq!(insights.therapeutic_goals.len(), 4);
        assert_eq!(insights.therapeutic_goals[0], "Develop effective coping strategies");
    }

    #[test]
    fn test_summary_truncates_on_char_boundary() {
        let long = "é".repeat(150);
        let insights = SessionInsights::from_history(&history(&["a"]), &long);
        assert_eq!(insights.summary, format!("Session 2. Current focus: {}", "é".repeat(100)));
    }
}
