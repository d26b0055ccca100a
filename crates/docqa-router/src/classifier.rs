//! Rule-based query classification

use regex::Regex;
use std::sync::LazyLock;

use docqa_core::{QueryComplexity, QueryType};

/// Pattern table per scored query type, in tie-break order.
static QUERY_PATTERNS: LazyLock<Vec<(QueryType, Vec<Regex>)>> = LazyLock::new(|| {
    let table: [(QueryType, &[&str]); 4] = [
        (
            QueryType::Factual,
            &[
                r"\b(what|who|when|where|which|how many|how much)\b",
                r"\b(define|definition|meaning)\b",
                r"\b(is|are|was|were|did|does|do)\b.*\?",
            ],
        ),
        (
            QueryType::Analytical,
            &[
                r"\b(compare|contrast|difference|similar|analyze|analysis)\b",
                r"\b(why|how|explain|reason|cause|effect)\b",
                r"\b(advantages|disadvantages|pros|cons)\b",
            ],
        ),
        (
            QueryType::Summarization,
            &[
                r"\b(summarize|summary|overview|main points|key points)\b",
                r"\b(tell me about|describe|outline)\b",
                r"\b(what are the.*topics|themes|ideas)\b",
            ],
        ),
        (
            QueryType::Procedural,
            &[
                r"\b(how to|steps|process|procedure|method)\b",
                r"\b(guide|tutorial|instructions)\b",
                r"\b(implement|create|build|setup)\b",
            ],
        ),
    ];

    table
        .into_iter()
        .map(|(query_type, patterns)| {
            let compiled = patterns.iter().map(|p| Regex::new(p).unwrap()).collect();
            (query_type, compiled)
        })
        .collect()
});

const COMPARISON_WORDS: &[&str] = &["compare", "contrast", "versus", "vs", "different", "similar"];
const CONCEPT_WORDS: &[&str] = &["and", "or", "both", "either", "multiple", "various", "several"];
const ANALYSIS_WORDS: &[&str] = &[
    "analyze",
    "evaluate",
    "assess",
    "relationship",
    "impact",
    "implications",
];

/// Classification confidence for queries no pattern matched.
const GENERAL_CONFIDENCE: f64 = 0.6;

/// Total pattern matches of one query type against a lower-cased query.
fn pattern_matches(query_type: QueryType, query_lower: &str) -> usize {
    QUERY_PATTERNS
        .iter()
        .find(|(candidate, _)| *candidate == query_type)
        .map(|(_, patterns)| {
            patterns
                .iter()
                .map(|p| p.find_iter(query_lower).count())
                .sum()
        })
        .unwrap_or(0)
}

/// Classify a query by counting pattern matches per type.
///
/// The type with the strictly highest count wins, so on a tie the type listed
/// first keeps the lead. With no matches at all the query is `General`.
pub fn classify_query_type(query: &str) -> QueryType {
    let query_lower = query.to_lowercase();

    let mut best = (QueryType::General, 0);
    for (query_type, _) in QUERY_PATTERNS.iter() {
        let score = pattern_matches(*query_type, &query_lower);
        if score > best.1 {
            best = (*query_type, score);
        }
    }

    best.0
}

/// Confidence in an already chosen classification.
pub fn classification_confidence(query: &str, query_type: QueryType) -> f64 {
    if query_type == QueryType::General {
        return GENERAL_CONFIDENCE;
    }

    match pattern_matches(query_type, &query.to_lowercase()) {
        n if n >= 3 => 0.9,
        2 => 0.8,
        1 => 0.7,
        _ => 0.5,
    }
}

/// Classify a query and report how confident the classification is.
pub fn classify(query: &str) -> (QueryType, f64) {
    let query_type = classify_query_type(query);
    (query_type, classification_confidence(query, query_type))
}

/// Estimate how much work a query needs.
///
/// One point each for: more than 15 words, more than one question mark, a
/// comparison word, a multi-concept word, an analysis word. Word checks are
/// plain substring matches on the lower-cased query.
pub fn assess_complexity(query: &str, _query_type: QueryType) -> QueryComplexity {
    let query_lower = query.to_lowercase();
    let contains_any = |words: &[&str]| words.iter().any(|word| query_lower.contains(word));

    let indicators = [
        query.split_whitespace().count() > 15,
        query.matches('?').count() > 1,
        contains_any(COMPARISON_WORDS),
        contains_any(CONCEPT_WORDS),
        contains_any(ANALYSIS_WORDS),
    ]
    .into_iter()
    .filter(|hit| *hit)
    .count();

    match indicators {
        n if n >= 3 => QueryComplexity::Complex,
        n if n >= 1 => QueryComplexity::Medium,
        _ => QueryComplexity::Simple,
    }
}
