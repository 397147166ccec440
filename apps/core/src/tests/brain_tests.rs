//! Brain Module Tests
//!
//! Properties of the keyword classifier and the responder that hold across the whole catalogue.

use crate::brain::keywords::catalog;
use crate::brain::scanner::scan;
use crate::brain::{
    classify, AgentType, Category, Classifier, ConversationContext, MoodTrend, RecommendedAction,
    IMMEDIATE_ATTENTION_THRESHOLD, MAX_RISK_SCORE,
};

#[cfg(test)]
mod classification_tests {
    use super::*;

    #[test]
    fn test_every_keyword_is_detected_alone() {
        for group in catalog().categories() {
            for keyword in group.keywords {
                let result = classify(keyword);
                assert!(
                    result.matched_keywords.iter().any(|k| k == keyword),
                    "'{}' was not matched",
                    keyword
                );
                // A longer keyword may also contain a higher-priority one.
                assert!(
                    catalog().severity_of(result.dominant_category) >= group.base_severity,
                    "'{}' resolved to {:?}",
                    keyword,
                    result.dominant_category
                );
            }
        }
    }

    #[test]
    fn test_score_never_exceeds_maximum() {
        let everything: Vec<&str> = catalog()
            .categories()
            .iter()
            .flat_map(|g| g.keywords.iter().copied())
            .chain(catalog().modifiers().iter().flat_map(|m| m.phrases.iter().copied()))
            .collect();
        let text = everything.join(" ").repeat(20);

        let result = classify(&text);
        assert_eq!(result.risk_score, MAX_RISK_SCORE);
        assert_eq!(result.confidence, 1.0);
        assert!(result.requires_immediate_attention);
    }

    #[test]
    fn test_modifiers_alone_do_not_raise_risk() {
        for modifier in catalog().modifiers() {
            for phrase in modifier.phrases {
                if !scan(phrase).matches.is_empty() {
                    continue;
                }
                let result = classify(phrase);
                assert_eq!(result.dominant_category, Category::Neutral, "{}", phrase);
                assert_eq!(result.risk_score, 0, "{}", phrase);
            }
        }
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let lower = classify("i am so anxious");
        let upper = classify("I AM SO ANXIOUS");
        assert_eq!(lower, upper);
        assert_eq!(upper.dominant_category, Category::Anxiety);
    }

    #[test]
    fn test_curly_apostrophes_match() {
        let result = classify("I can\u{2019}t go on anymore");
        assert_eq!(result.dominant_category, Category::Crisis);
    }

    #[test]
    fn test_confidence_grows_with_matches() {
        let one = classify("I feel sad");
        let two = classify("I feel sad and lonely");
        let many = classify("I feel sad and lonely, I feel empty, I feel numb and keep crying");
        assert!(one.confidence < two.confidence);
        assert!(two.confidence <= many.confidence);
        assert!(many.confidence <= 1.0);
    }

    #[test]
    fn test_empty_and_whitespace_are_neutral() {
        for text in ["", "   ", "\n\t"] {
            let result = classify(text);
            assert_eq!(result.dominant_category, Category::Neutral);
            assert_eq!(result.risk_score, 0);
            assert!(!result.requires_immediate_attention);
        }
    }

    #[test]
    fn test_very_long_input_is_handled() {
        let text = format!("{} worried", "lorem ipsum ".repeat(50_000));
        let result = classify(&text);
        assert_eq!(result.dominant_category, Category::Anxiety);
    }

    #[test]
    fn test_everyday_sentences_stay_neutral() {
        let samples = [
            "Winter has begun and the days are short",
            "My rollerblade broke on the way home",
            "My friend encouraged me to call my sister",
            "What is your phone number?",
            "The traffic was a nightmare this morning",
            "The deployment to production went fine",
            "Please empty the dishwasher",
            "My hispanic neighbours brought cake",
            "I saw the ambassador at the parade",
            "We toured Europe last summer with a shotgun microphone",
            "I had a long day at work",
            "The kids spilled their juice today",
        ];
        for text in samples {
            let result = classify(text);
            assert_eq!(result.dominant_category, Category::Neutral, "{}", text);
            assert!(result.matched_keywords.is_empty(), "{}: {:?}", text, result.matched_keywords);
            assert!(!result.requires_immediate_attention, "{}", text);
        }
    }

    #[test]
    fn test_everyday_words_do_not_escalate_real_matches() {
        // "begun" must not count as a method modifier
        let result = classify("I feel hopeless now that winter has begun");
        assert_eq!(result.dominant_category, Category::Distress);
        assert_eq!(result.risk_score, 6);
        assert!(!result.requires_immediate_attention);

        // "rollerblade" is not a self-harm keyword
        let result = classify("I feel sad, my rollerblade broke");
        assert_eq!(result.dominant_category, Category::Sadness);
        assert_eq!(result.matched_keywords, vec!["feel sad"]);
        assert!(!result.requires_immediate_attention);

        let result = classify("I'm sad about my phone number");
        assert_eq!(result.matched_keywords, vec!["i'm sad"]);
    }

    #[test]
    fn test_attention_flag_matches_threshold() {
        let samples = [
            "I want to kill myself",
            "I feel trapped",
            "I feel trapped and alone",
            "I feel trapped tonight",
            "I'm furious",
            "nice weather",
        ];
        for text in samples {
            let result = classify(text);
            assert_eq!(
                result.requires_immediate_attention,
                result.risk_score >= IMMEDIATE_ATTENTION_THRESHOLD,
                "{}",
                text
            );
        }
    }
}

#[cfg(test)]
mod responder_tests {
    use super::*;

    #[test]
    fn test_every_high_risk_reply_uses_crisis_support() {
        let classifier = Classifier::new();
        let samples = [
            "I want to kill myself",
            "I keep cutting myself",
            "I am going to overdose",
            "I'm desperate and planning something tonight with a knife",
        ];
        for text in samples {
            let reply = classifier.respond(text, &ConversationContext::default());
            assert!(reply.requires_immediate_attention(), "{}", text);
            assert_eq!(reply.agent_type, AgentType::CrisisSupport, "{}", text);
            assert_eq!(
                reply.recommended_action,
                RecommendedAction::ImmediateCrisisIntervention
            );
            assert!(!reply.immediate_actions.is_empty());
        }
    }

    #[test]
    fn test_trauma_reply_uses_trauma_specialist() {
        let reply = Classifier::new().respond(
            "The flashbacks from combat keep coming back",
            &ConversationContext::default(),
        );
        assert_eq!(reply.classification.dominant_category, Category::Trauma);
        assert_eq!(reply.agent_type, AgentType::TraumaSpecialist);
        assert!(!reply.requires_immediate_attention());
    }

    #[test]
    fn test_neutral_reply_is_therapist() {
        let reply = Classifier::new().respond("Hello there", &ConversationContext::default());
        assert_eq!(reply.emotional_state(), "neutral");
        assert_eq!(reply.agent_type, AgentType::Therapist);
        assert_eq!(reply.recommended_action, RecommendedAction::GeneralSupport);
        assert_eq!(reply.session.session_number, 1);
        assert_eq!(reply.mood.trend, MoodTrend::NewSession);
    }

    #[test]
    fn test_reply_serializes_category_label() {
        let reply = Classifier::new().respond("I am so sad", &ConversationContext::default());
        let value = serde_json::to_value(&reply.classification).unwrap();
        assert_eq!(value["dominant_category"], "sad");
        assert_eq!(value["requires_immediate_attention"], false);
    }

    #[test]
    fn test_positive_history_trend() {
        let context = ConversationContext::new(
            vec!["one".into(), "two".into()],
            &["neutral".to_string(), "happy".to_string()],
        );
        let reply = Classifier::new().respond("Things are okay", &context);
        assert_eq!(reply.mood.trend, MoodTrend::PositiveTrend);
    }
}
