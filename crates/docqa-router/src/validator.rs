//! Post-generation checks driven by the processing strategy

use serde::{Deserialize, Serialize};

use docqa_core::{PostProcessingCheck, QueryAnalysis};

const STEP_INDICATORS: &[&str] = &["step", "first", "then", "next", "finally"];
const SUMMARY_INDICATORS: &[&str] = &["main", "key", "important", "summary"];

/// Outcome of the strategy's post-processing checks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseValidation {
    pub is_valid: bool,
    pub quality_score: f64,
    pub issues: Vec<String>,
}

/// Run the basic shape checks plus every check the strategy asked for.
pub fn validate_response(response: &str, analysis: &QueryAnalysis) -> ResponseValidation {
    let mut quality_score = 0.8;
    let mut issues = Vec::new();
    let response_lower = response.to_lowercase();

    if response.trim().chars().count() < 50 {
        issues.push("Response too short".to_string());
        quality_score -= 0.2;
    }

    if response.contains("I don't know") && response.chars().count() < 100 {
        issues.push("Response lacks detail".to_string());
        quality_score -= 0.1;
    }

    for check in &analysis.strategy.post_processing {
        match check {
            PostProcessingCheck::StepValidation => {
                if !STEP_INDICATORS.iter().any(|i| response_lower.contains(i)) {
                    issues.push("Missing step-by-step structure".to_string());
                    quality_score -= 0.2;
                }
            }
            PostProcessingCheck::StructureCheck => {
                if !SUMMARY_INDICATORS.iter().any(|i| response_lower.contains(i)) {
                    issues.push("Missing summary indicators".to_string());
                    quality_score -= 0.1;
                }
            }
            PostProcessingCheck::ComplexityValidation => {
                if response.split_whitespace().count() < 100 {
                    issues.push("Response may be too brief for complex query".to_string());
                    quality_score -= 0.1;
                }
            }
            // answered by the honesty gate after quality scoring
            PostProcessingCheck::ConfidenceCheck => {}
        }
    }

    ResponseValidation {
        is_valid: quality_score > 0.5,
        quality_score,
        issues,
    }
}
