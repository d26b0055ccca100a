//! Human-readable issues and suggestions for an assessed answer

use docqa_core::{SourceDocument, RESPONSE_THRESHOLD};

const VAGUE_INDICATORS: &[&str] = &["maybe", "possibly", "might be", "could be", "seems like"];

pub const LOW_QUALITY_ISSUE: &str = "Overall response quality is below threshold";
pub const BRIEF_ISSUE: &str = "Response is very brief";
pub const NO_SOURCES_ISSUE: &str = "No source documents available";
pub const UNCERTAINTY_ISSUE: &str = "System expressing uncertainty";
pub const VAGUE_ISSUE: &str = "Response contains uncertainty indicators";

/// Issues and suggestions, in check order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnosis {
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
}

impl Diagnosis {
    fn flag(&mut self, issue: &str, suggestion: &str) {
        self.issues.push(issue.to_string());
        self.suggestions.push(suggestion.to_string());
    }
}

/// Run the fixed list of checks against an assessed answer.
pub fn diagnose(response: &str, sources: &[SourceDocument], overall: f64) -> Diagnosis {
    let mut diagnosis = Diagnosis::default();

    if overall < RESPONSE_THRESHOLD {
        diagnosis.flag(
            LOW_QUALITY_ISSUE,
            "Consider rephrasing the query or uploading more relevant documents",
        );
    }

    if response.split_whitespace().count() < 30 {
        diagnosis.flag(BRIEF_ISSUE, "Ask for more detailed information or context");
    }

    if sources.is_empty() {
        diagnosis.flag(
            NO_SOURCES_ISSUE,
            "Upload relevant documents to improve response quality",
        );
    }

    if response.contains("I don't know") || response.contains("I don't have") {
        diagnosis.flag(
            UNCERTAINTY_ISSUE,
            "Try a more specific question or upload additional documents",
        );
    }

    let response_lower = response.to_lowercase();
    if VAGUE_INDICATORS.iter().any(|i| response_lower.contains(i)) {
        diagnosis.flag(
            VAGUE_ISSUE,
            "Look for more specific information in your documents",
        );
    }

    diagnosis
}
