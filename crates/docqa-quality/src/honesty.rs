//! Decides what the user actually sees for an assessed answer

use serde::{Deserialize, Serialize};
use std::fmt;

use docqa_core::{ConfidenceLevel, QualityMetrics};

/// Message shown instead of an answer that did not pass assessment.
pub const UNCERTAINTY_MESSAGE: &str = "I don't have enough reliable information in the provided documents to answer this question confidently.";

const MAX_LISTED_ISSUES: usize = 3;
const MAX_LISTED_SUGGESTIONS: usize = 2;

/// How a draft answer was delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateState {
    /// Delivered unchanged
    Passthrough,
    /// Delivered with a confidence note appended
    Annotated,
    /// Withheld and replaced by an uncertainty message
    Refused,
}

impl fmt::Display for GateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateState::Passthrough => f.write_str("passthrough"),
            GateState::Annotated => f.write_str("annotated"),
            GateState::Refused => f.write_str("refused"),
        }
    }
}

/// Text chosen for delivery and the state that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatedResponse {
    pub state: GateState,
    pub text: String,
}

/// Turn a draft answer and its assessment into the text shown to the user.
pub fn gate(draft: &str, metrics: &QualityMetrics) -> GatedResponse {
    if !metrics.should_respond {
        return GatedResponse {
            state: GateState::Refused,
            text: uncertainty_response(metrics),
        };
    }

    match metrics.confidence_level {
        ConfidenceLevel::VeryLow => GatedResponse {
            state: GateState::Annotated,
            text: format!(
                "{draft}\n\n⚠️ **Confidence Level: {}** - This response is based on limited information and may not be complete or fully accurate.",
                metrics.confidence_level.label()
            ),
        },
        ConfidenceLevel::Low => GatedResponse {
            state: GateState::Annotated,
            text: format!(
                "{draft}\n\n📊 **Confidence Level: {}** ({:.1}%)",
                metrics.confidence_level.label(),
                metrics.overall * 100.0
            ),
        },
        ConfidenceLevel::Medium | ConfidenceLevel::High => GatedResponse {
            state: GateState::Passthrough,
            text: draft.to_string(),
        },
    }
}

fn uncertainty_response(metrics: &QualityMetrics) -> String {
    let mut text = UNCERTAINTY_MESSAGE.to_string();

    if !metrics.issues.is_empty() {
        text.push_str("\n\nSpecific issues identified:\n");
        for issue in metrics.issues.iter().take(MAX_LISTED_ISSUES) {
            text.push_str(&format!("• {}\n", issue));
        }
    }

    if !metrics.suggestions.is_empty() {
        text.push_str("\nSuggestions:\n");
        for suggestion in metrics.suggestions.iter().take(MAX_LISTED_SUGGESTIONS) {
            text.push_str(&format!("• {}\n", suggestion));
        }
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(overall: f64, level: ConfidenceLevel, should_respond: bool) -> QualityMetrics {
        QualityMetrics {
            relevance: overall,
            completeness: overall,
            accuracy: overall,
            clarity: overall,
            source_quality: overall,
            overall,
            confidence_level: level,
            should_respond,
            issues: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    #[test]
    fn test_high_confidence_passes_through() {
        let gated = gate("Paris.", &metrics(0.9, ConfidenceLevel::High, true));
        assert_eq!(gated.state, GateState::Passthrough);
        assert_eq!(gated.text, "Paris.");
    }

    #[test]
    fn test_medium_confidence_passes_through() {
        let gated = gate("Paris.", &metrics(0.7, ConfidenceLevel::Medium, true));
        assert_eq!(gated.state, GateState::Passthrough);
    }

    #[test]
    fn test_low_confidence_gets_indicator() {
        let gated = gate("Paris.", &metrics(0.45, ConfidenceLevel::Low, true));
        assert_eq!(gated.state, GateState::Annotated);
        assert_eq!(gated.text, "Paris.\n\n📊 **Confidence Level: Low** (45.0%)");
    }

    #[test]
    fn test_very_low_confidence_gets_disclaimer() {
        let gated = gate("Paris.", &metrics(0.3, ConfidenceLevel::VeryLow, true));
        assert_eq!(gated.state, GateState::Annotated);
        assert!(gated.text.starts_with("Paris.\n\n⚠️ **Confidence Level: Very Low**"));
    }

    #[test]
    fn test_refusal_lists_top_issues_and_suggestions() {
        let mut m = metrics(0.55, ConfidenceLevel::Low, false);
        m.issues = (1..=5).map(|i| format!("issue {i}")).collect();
        m.suggestions = (1..=4).map(|i| format!("suggestion {i}")).collect();

        let gated = gate("A draft that must not be shown", &m);
        assert_eq!(gated.state, GateState::Refused);
        assert!(!gated.text.contains("must not be shown"));
        assert_eq!(
            gated.text,
            format!(
                "{UNCERTAINTY_MESSAGE}\n\nSpecific issues identified:\n• issue 1\n• issue 2\n• issue 3\n\nSuggestions:\n• suggestion 1\n• suggestion 2\n"
            )
        );
    }

    #[test]
    fn test_refusal_without_issues_is_bare_message() {
        let gated = gate("draft", &metrics(0.1, ConfidenceLevel::VeryLow, false));
        assert_eq!(gated.text, UNCERTAINTY_MESSAGE);
    }
}
