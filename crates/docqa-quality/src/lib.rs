//! Answer quality assessment for DocQA
//!
//! Scores a draft answer against the query and the passages it was generated
//! from, lists what looks wrong with it, and decides whether to deliver it
//! as-is, deliver it with a confidence note, or refuse.

mod diagnoser;
mod honesty;
mod scorer;


pub use diagnoser::{diagnose, Diagnosis};
pub use honesty::{gate, GateState, GatedResponse, UNCERTAINTY_MESSAGE};
pub use scorer::{
    accuracy, clarity, completeness, relevance, score, source_quality, SubScores,
    ACCURACY_WEIGHT, CLARITY_WEIGHT, COMPLETENESS_WEIGHT, RELEVANCE_WEIGHT, SOURCE_QUALITY_WEIGHT,
};

// Re-export core types for convenience
pub use docqa_core::{ConfidenceLevel, QualityMetrics, SourceDocument, RESPONSE_THRESHOLD};

use tracing::{info, warn};

/// Assesses draft answers and gates their delivery
#[derive(Debug, Clone, Copy, Default)]
pub struct QualityAssessor;

impl QualityAssessor {
    pub fn new() -> Self {
        Self
    }

    /// Score a draft answer and collect its issues
    pub fn assess(&self, query: &str, response: &str, sources: &[SourceDocument]) -> QualityMetrics {
        let scores = score(query, response, sources);
        let overall = scores.overall();
        let confidence_level = ConfidenceLevel::from_score(overall);
        let Diagnosis {
            issues,
            suggestions,
        } = diagnose(response, sources, overall);

        info!(overall, level = %confidence_level, "quality assessment");

        QualityMetrics {
            relevance: scores.relevance,
            completeness: scores.completeness,
            accuracy: scores.accuracy,
            clarity: scores.clarity,
            source_quality: scores.source_quality,
            overall,
            confidence_level,
            should_respond: overall >= RESPONSE_THRESHOLD,
            issues,
            suggestions,
        }
    }

    /// Decide what to show for an assessed draft
    pub fn respond(&self, draft: &str, metrics: &QualityMetrics) -> GatedResponse {
        let gated = gate(draft, metrics);
        if gated.state == GateState::Refused {
            warn!(overall = metrics.overall, issues = metrics.issues.len(), "answer withheld");
        }
        gated
    }

    /// Assess and gate in one step
    pub fn review(
        &self,
        query: &str,
        draft: &str,
        sources: &[SourceDocument],
    ) -> (QualityMetrics, GatedResponse) {
        let metrics = self.assess(query, draft, sources);
        let gated = self.respond(draft, &metrics);
        (metrics, gated)
    }
}
