//! Processing strategy selection

use docqa_core::{PostProcessingCheck, ProcessingStrategy, QueryComplexity, QueryType};

pub const MIN_RETRIEVAL_K: usize = 2;
pub const MAX_RETRIEVAL_K: usize = 10;
pub const MIN_MAX_TOKENS: u32 = 800;
pub const MAX_MAX_TOKENS: u32 = 3000;

/// Pick retrieval count, sampling temperature, token budget, template and
/// post-processing checks for a classified query.
pub fn select_strategy(query_type: QueryType, complexity: QueryComplexity) -> ProcessingStrategy {
    let mut strategy = match query_type {
        QueryType::Factual => ProcessingStrategy {
            retrieval_k: 3,
            temperature: 0.0,
            max_tokens: 1000,
            prompt_template_id: QueryType::Factual,
            post_processing: Vec::new(),
        },
        QueryType::Analytical => ProcessingStrategy {
            retrieval_k: 6,
            temperature: 0.2,
            max_tokens: 2000,
            prompt_template_id: QueryType::Analytical,
            post_processing: vec![PostProcessingCheck::ConfidenceCheck],
        },
        QueryType::Summarization => ProcessingStrategy {
            retrieval_k: 8,
            temperature: 0.1,
            max_tokens: 1500,
            prompt_template_id: QueryType::Summarization,
            post_processing: vec![PostProcessingCheck::StructureCheck],
        },
        QueryType::Procedural => ProcessingStrategy {
            retrieval_k: 5,
            temperature: 0.0,
            max_tokens: 2000,
            prompt_template_id: QueryType::Procedural,
            post_processing: vec![PostProcessingCheck::StepValidation],
        },
        QueryType::General => ProcessingStrategy::default(),
    };

    match complexity {
        QueryComplexity::Complex => {
            strategy.retrieval_k = (strategy.retrieval_k + 2).min(MAX_RETRIEVAL_K);
            strategy.max_tokens = (strategy.max_tokens + 500).min(MAX_MAX_TOKENS);
            strategy
                .post_processing
                .push(PostProcessingCheck::ComplexityValidation);
        }
        QueryComplexity::Simple => {
            strategy.retrieval_k = strategy.retrieval_k.saturating_sub(1).max(MIN_RETRIEVAL_K);
            strategy.max_tokens = strategy.max_tokens.saturating_sub(300).max(MIN_MAX_TOKENS);
        }
        QueryComplexity::Medium => {}
    }

    strategy
}
