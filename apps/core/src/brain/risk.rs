//! Risk aggregation: turns a scan into a bounded score, a dominant category and a confidence.

use serde::{Deserialize, Serialize};

use super::keywords::{Category, ModifierKind, IMMEDIATE_ATTENTION_THRESHOLD, MAX_RISK_SCORE};
use super::scanner::ScanResult;

/// Aggregated risk of a single message.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskAssessment {
    pub dominant: Category,
    pub risk_score: u8,
    pub confidence: f32,
    pub modifiers: Vec<ModifierKind>,
}

impl RiskAssessment {
    pub fn neutral() -> Self {
        Self {
            dominant: Category::Neutral,
            risk_score: 0,
            confidence: 0.0,
            modifiers: Vec::new(),
        }
    }

    pub fn requires_immediate_attention(&self) -> bool {
        self.risk_score >= IMMEDIATE_ATTENTION_THRESHOLD
    }
}

/// Confidence for a number of matched keywords: `min(0.6 + 0.2 * n, 1.0)`, or 0 without matches.
pub fn confidence_for(match_count: usize) -> f32 {
    if match_count == 0 {
        return 0.0;
    }
    // Past three matches the value is saturated; capping avoids float noise on huge counts.
    let n = match_count.min(3) as f32;
    (0.6 + 0.2 * n).min(1.0)
}

/// Combines per-category matches and modifiers into a `RiskAssessment`.
///
/// Score is the highest base severity among matched categories plus each modifier kind's
/// increment, clamped to `MAX_RISK_SCORE`. Modifiers alone never raise the score.
pub fn aggregate(scan: &ScanResult) -> RiskAssessment {
    // Matches arrive in priority order; keep the first one on equal severity.
    let Some(dominant) = scan
        .matches
        .iter()
        .reduce(|best, m| if m.base_severity > best.base_severity { m } else { best })
    else {
        return RiskAssessment::neutral();
    };

    let bonus: u16 = scan
        .modifiers
        .iter()
        .map(|m| u16::from(m.increment()))
        .sum();
    let score = (u16::from(dominant.base_severity) + bonus).min(u16::from(MAX_RISK_SCORE)) as u8;

    RiskAssessment {
        dominant: dominant.category,
        risk_score: score,
        confidence: confidence_for(scan.matched_keywords().len()),
        modifiers: scan.modifiers.clone(),
    }
}

/// Level of care suggested for a risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendedAction {
    ImmediateCrisisIntervention,
    EnhancedSupport,
    StandardTherapeuticSupport,
    GeneralSupport,
}

impl RecommendedAction {
    pub fn for_score(score: u8) -> Self {
        match score {
            s if s >= IMMEDIATE_ATTENTION_THRESHOLD => RecommendedAction::ImmediateCrisisIntervention,
            5..=7 => RecommendedAction::EnhancedSupport,
            3..=4 => RecommendedAction::StandardTherapeuticSupport,
            _ => RecommendedAction::GeneralSupport,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendedAction::ImmediateCrisisIntervention => "immediate_crisis_intervention",
            RecommendedAction::EnhancedSupport => "enhanced_support",
            RecommendedAction::StandardTherapeuticSupport => "standard_therapeutic_support",
            RecommendedAction::GeneralSupport => "general_support",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::scanner::scan;

    #[test]
    fn test_confidence_curve() {
        assert_eq!(confidence_for(0), 0.0);
        assert!((confidence_for(1) - 0.8).abs() < 1e-6);
        assert!((confidence_for(2) - 1.0).abs() < 1e-6);
        assert_eq!(confidence_for(50), 1.0);
    }

    #[test]
    fn test_confidence_is_monotonic() {
        let mut previous = 0.0;
        for n in 0..20 {
            let c = confidence_for(n);
            assert!(c >= previous);
            assert!((0.0..=1.0).contains(&c));
            previous = c;
        }
    }

    #[test]
    fn test_no_match_is_neutral_even_with_modifiers() {
        let assessment = aggregate(&scan("I'm going to the bridge tonight with nobody"));
        assert_eq!(assessment, RiskAssessment::neutral());
    }

    #[test]
    fn test_modifiers_add_once_per_kind() {
        // sad (4) + urgency (2) + isolation (1); "today" and "tonight" are one kind
        let assessment = aggregate(&scan("I'm sad today and tonight, all alone"));
        assert_eq!(assessment.dominant, Category::Sadness);
        assert_eq!(assessment.risk_score, 7);
        assert!(!assessment.requires_immediate_attention());
    }

    #[test]
    fn test_score_is_clamped() {
        let assessment =
            aggregate(&scan("I want to die tonight, I have pills and a gun and I'm alone"));
        assert_eq!(assessment.risk_score, MAX_RISK_SCORE);
        assert!(assessment.requires_immediate_attention());
    }

    #[test]
    fn test_equal_severity_prefers_priority_order() {
        // sadness and anxiety share severity 4; sadness is listed first
        let assessment = aggregate(&scan("I feel anxious and so sad"));
        assert_eq!(assessment.dominant, Category::Sadness);

        // crisis and self-harm share severity 9; crisis wins
        let assessment = aggregate(&scan("I want to hurt myself, I'm suicidal"));
        assert_eq!(assessment.dominant, Category::Crisis);
    }

    #[test]
    fn test_recommended_action_bands() {
        assert_eq!(RecommendedAction::for_score(10), RecommendedAction::ImmediateCrisisIntervention);
        assert_eq!(RecommendedAction::for_score(8), RecommendedAction::ImmediateCrisisIntervention);
        assert_eq!(RecommendedAction::for_score(7), RecommendedAction::EnhancedSupport);
        assert_eq!(RecommendedAction::for_score(5), RecommendedAction::EnhancedSupport);
        assert_eq!(RecommendedAction::for_score(4), RecommendedAction::StandardTherapeuticSupport);
        assert_eq!(RecommendedAction::for_score(3), RecommendedAction::StandardTherapeuticSupport);
        assert_eq!(RecommendedAction::for_score(0), RecommendedAction::GeneralSupport);
        assert_eq!(
            RecommendedAction::EnhancedSupport.as_str(),
            "enhanced_support"
        );
    }
}
