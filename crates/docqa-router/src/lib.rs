//! Query routing for DocQA
//!
//! Classifies incoming queries, estimates their complexity and picks the
//! processing strategy and instruction template the generator should use.

mod classifier;
mod strategy;
mod templates;
mod validator;

#[cfg(test)]
mod tests;

pub use classifier::{assess_complexity, classification_confidence, classify, classify_query_type};
pub use strategy::{select_strategy, MAX_MAX_TOKENS, MAX_RETRIEVAL_K, MIN_MAX_TOKENS, MIN_RETRIEVAL_K};
pub use templates::{render_prompt, template_for};
pub use validator::{validate_response, ResponseValidation};

// Re-export core types for convenience
pub use docqa_core::{
    PostProcessingCheck, ProcessingStrategy, QueryAnalysis, QueryComplexity, QueryType,
};

use tracing::{debug, info};

/// Routes queries to a processing strategy
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryRouter;

impl QueryRouter {
    pub fn new() -> Self {
        Self
    }

    /// Classify a query and derive the strategy to answer it with
    pub fn analyze(&self, query: &str) -> QueryAnalysis {
        let (query_type, confidence) = classify(query);
        let complexity = assess_complexity(query, query_type);
        let strategy = select_strategy(query_type, complexity);

        info!(%query_type, %complexity, confidence, "query analyzed");
        debug!(?strategy, "processing strategy selected");

        QueryAnalysis {
            query: query.to_string(),
            query_type,
            complexity,
            strategy,
            confidence,
        }
    }

    /// Instruction template for an analyzed query
    pub fn template(&self, analysis: &QueryAnalysis) -> &'static str {
        template_for(analysis.strategy.prompt_template_id)
    }

    /// Check a draft answer against the strategy's post-processing checks
    pub fn validate(&self, response: &str, analysis: &QueryAnalysis) -> ResponseValidation {
        validate_response(response, analysis)
    }
}
