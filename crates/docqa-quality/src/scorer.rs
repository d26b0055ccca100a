//! Sub-scores for a draft answer
//!
//! All heuristics are lexical. The thresholds downstream (0.4, 0.6, 0.8) were
//! tuned against exactly these definitions, so substring checks stay substring
//! checks even where a token match would look tidier.

use docqa_core::{extract_key_facts, extract_key_terms, SourceDocument};

pub const RELEVANCE_WEIGHT: f64 = 0.25;
pub const COMPLETENESS_WEIGHT: f64 = 0.20;
pub const ACCURACY_WEIGHT: f64 = 0.25;
pub const CLARITY_WEIGHT: f64 = 0.15;
pub const SOURCE_QUALITY_WEIGHT: f64 = 0.15;

const QUESTION_INDICATORS: &[&str] = &["?", "what", "how", "why", "when", "where", "who"];
const ANSWER_PATTERNS: &[&str] = &[
    "the answer is",
    "because",
    "due to",
    "this means",
    "as a result",
];
const INCOMPLETE_INDICATORS: &[&str] = &[
    "i don't have enough information",
    "more information needed",
    "cannot determine",
    "unclear from the context",
    "insufficient data",
];
const CONCLUSION_INDICATORS: &[&str] = &["in conclusion", "to summarize", "overall", "in summary"];
const FABRICATION_INDICATORS: &[&str] = &[
    "according to my knowledge",
    "based on my training",
    "i believe",
    "it is likely that",
];
const STRUCTURE_INDICATORS: &[&str] = &[
    "first",
    "second",
    "third",
    "finally",
    "however",
    "therefore",
    "moreover",
    "in addition",
    "furthermore",
    "consequently",
];
const JARGON_WORDS: &[&str] = &["subsequently", "consequently", "nevertheless", "furthermore"];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// The five sub-scores of one assessment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubScores {
    pub relevance: f64,
    pub completeness: f64,
    pub accuracy: f64,
    pub clarity: f64,
    pub source_quality: f64,
}

impl SubScores {
    /// Weighted combination of the five sub-scores.
    pub fn overall(&self) -> f64 {
        let overall = self.relevance * RELEVANCE_WEIGHT
            + self.completeness * COMPLETENESS_WEIGHT
            + self.accuracy * ACCURACY_WEIGHT
            + self.clarity * CLARITY_WEIGHT
            + self.source_quality * SOURCE_QUALITY_WEIGHT;
        overall.clamp(0.0, 1.0)
    }
}

/// Score a draft answer on all five axes.
pub fn score(query: &str, response: &str, sources: &[SourceDocument]) -> SubScores {
    SubScores {
        relevance: relevance(query, response),
        completeness: completeness(response),
        accuracy: accuracy(response, sources),
        clarity: clarity(response),
        source_quality: source_quality(sources, query),
    }
}

/// How well the answer covers the query's terms and addresses the question.
pub fn relevance(query: &str, response: &str) -> f64 {
    let query_terms = extract_key_terms(query);
    if query_terms.is_empty() {
        return 0.7;
    }

    let response_lower = response.to_lowercase();
    let matching = query_terms
        .iter()
        .filter(|term| response_lower.contains(term.as_str()))
        .count();
    let term_overlap = matching as f64 / query_terms.len() as f64;

    let mut addresses_question = 0.8;
    if contains_any(&query.to_lowercase(), QUESTION_INDICATORS) {
        if contains_any(&response_lower, ANSWER_PATTERNS) {
            addresses_question = 1.0;
        } else if response.chars().count() < 50 {
            addresses_question = 0.5;
        }
    }

    (term_overlap * 0.6 + addresses_question * 0.4).clamp(0.0, 1.0)
}

/// Length-based completeness, with penalties for admitted gaps.
pub fn completeness(response: &str) -> f64 {
    let response_lower = response.to_lowercase();

    let mut score = if contains_any(&response_lower, INCOMPLETE_INDICATORS) {
        0.4
    } else {
        match response.split_whitespace().count() {
            n if n < 20 => 0.3,
            n if n < 50 => 0.6,
            n if n < 100 => 0.8,
            _ => 1.0,
        }
    };

    if contains_any(&response_lower, CONCLUSION_INDICATORS) {
        score = (score + 0.1_f64).min(1.0);
    }

    score
}

/// Share of the answer's factual sentences that share a word with the sources.
///
/// Neutral 0.5 without sources, 0.7 when the answer states no facts.
pub fn accuracy(response: &str, sources: &[SourceDocument]) -> f64 {
    if sources.is_empty() {
        return 0.5;
    }

    let source_content = sources
        .iter()
        .map(|doc| doc.content.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");
    let response_lower = response.to_lowercase();

    let facts = extract_key_facts(&response_lower);
    if facts.is_empty() {
        return 0.7;
    }

    let supported = facts
        .iter()
        .filter(|fact| fact.split_whitespace().any(|word| source_content.contains(word)))
        .count();
    let mut score = supported as f64 / facts.len() as f64;

    if contains_any(&response_lower, FABRICATION_INDICATORS) {
        score *= 0.8;
    }

    score.clamp(0.0, 1.0)
}

/// Readability from sentence length, discourse structure and jargon.
///
/// Sentences are split on '.', so an empty answer is one empty sentence.
pub fn clarity(response: &str) -> f64 {
    let sentences: Vec<&str> = response.split('.').collect();
    let total_words: usize = sentences.iter().map(|s| s.split_whitespace().count()).sum();
    let avg_sentence_length = total_words as f64 / sentences.len() as f64;

    let sentence_score = if (10.0..=25.0).contains(&avg_sentence_length) {
        1.0
    } else if (5.0..=35.0).contains(&avg_sentence_length) {
        0.8
    } else {
        0.6
    };

    let response_lower = response.to_lowercase();
    let structure_score = if contains_any(&response_lower, STRUCTURE_INDICATORS) {
        1.0
    } else {
        0.8
    };

    let jargon = JARGON_WORDS
        .iter()
        .filter(|word| response_lower.contains(*word))
        .count();
    let complexity_penalty = jargon as f64 * 0.05;

    (sentence_score * 0.6 + structure_score * 0.4 - complexity_penalty).clamp(0.3, 1.0)
}

/// Average usefulness of the retrieved passages; 0 when nothing was retrieved.
pub fn source_quality(sources: &[SourceDocument], query: &str) -> f64 {
    if sources.is_empty() {
        return 0.0;
    }

    let query_terms = extract_key_terms(query);

    let total: f64 = sources
        .iter()
        .map(|doc| {
            let content_lower = doc.content.to_lowercase();

            let term_match = if query_terms.is_empty() {
                0.5
            } else {
                let matching = query_terms
                    .iter()
                    .filter(|term| content_lower.contains(term.as_str()))
                    .count();
                matching as f64 / query_terms.len() as f64
            };

            let length_score = (doc.content.chars().count() as f64 / 1000.0).min(1.0);

            term_match * 0.5 + length_score * 0.3 + metadata_completeness(doc) * 0.2
        })
        .sum();

    (total / sources.len() as f64).clamp(0.0, 1.0)
}

fn metadata_completeness(doc: &SourceDocument) -> f64 {
    let present = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.is_empty());
    let metadata = &doc.metadata;

    let mut score = 0.5;
    if present(&metadata.source_file) {
        score += 0.2;
    }
    // page 0 counts as no page, like the "N/A" placeholder
    if present(&metadata.page) && !matches!(metadata.page.as_deref(), Some("N/A" | "0")) {
        score += 0.2;
    }
    if present(&metadata.file_type) {
        score += 0.1;
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_relevance_without_query_terms() {
        assert_eq!(relevance("", "anything"), 0.7);
        assert_eq!(relevance("is it?", "anything"), 0.7);
    }

    #[test]
    fn test_relevance_answer_connective() {
        let score = relevance(
            "Why is the sky blue?",
            "The sky looks blue because air scatters short wavelengths.",
        );
        // terms: sky, blue -> both present
        assert!(approx(score, 1.0));
    }

    #[test]
    fn test_relevance_short_answer_to_question() {
        let score = relevance("What is the capital of France?", "Lyon.");
        assert!(approx(score, 0.2));
    }

    #[test]
    fn test_relevance_statement_query() {
        let score = relevance("Rust ownership", "Ownership in Rust means one owner per value.");
        assert!(approx(score, 0.6 + 0.8 * 0.4));
    }

    #[test]
    fn test_completeness_buckets() {
        assert_eq!(completeness(""), 0.3);
        assert_eq!(completeness(&"word ".repeat(30)), 0.6);
        assert_eq!(completeness(&"word ".repeat(60)), 0.8);
        assert_eq!(completeness(&"word ".repeat(120)), 1.0);
    }

    #[test]
    fn test_completeness_indicators() {
        let long_but_unsure = format!(
            "{} I don't have enough information to say more.",
            "word ".repeat(120)
        );
        assert_eq!(completeness(&long_but_unsure), 0.4);

        let concluded = format!("{} In summary, that is all.", "word ".repeat(120));
        assert_eq!(completeness(&concluded), 1.0);
        assert!(approx(completeness("In conclusion, yes."), 0.4));
    }

    #[test]
    fn test_accuracy_defaults() {
        assert_eq!(accuracy("Paris is the capital.", &[]), 0.5);

        let sources = vec![SourceDocument::new("Paris is the capital of France.")];
        assert_eq!(accuracy("Yes indeed", &sources), 0.7);
    }

    #[test]
    fn test_accuracy_support_and_fabrication() {
        let sources = vec![SourceDocument::new("The Eiffel tower opened in 1889.")];
        assert_eq!(accuracy("The tower opened in 1889.", &sources), 1.0);

        let hedged = "I believe the tower opened in 1889.";
        assert!(approx(accuracy(hedged, &sources), 0.8));

        let unsupported = "Zzz qqq is xxyy.";
        assert_eq!(accuracy(unsupported, &sources), 0.0);
    }

    #[test]
    fn test_clarity_empty_response() {
        assert!(approx(clarity(""), 0.6 * 0.6 + 0.8 * 0.4));
    }

    #[test]
    fn test_clarity_structure_and_jargon() {
        let response = "First we collect the data from every regional office and store it. \
                        Consequently the nightly report is generated from the merged tables.";
        // two sentences of 12 and 10 words plus a trailing empty one -> avg 7.33
        let expected = 0.8 * 0.6 + 1.0 * 0.4 - 0.05;
        assert!(approx(clarity(response), expected));
    }

    #[test]
    fn test_clarity_floor() {
        let jargon = "subsequently consequently nevertheless furthermore";
        assert!(clarity(jargon) >= 0.3);
    }

    #[test]
    fn test_source_quality_metadata() {
        assert_eq!(source_quality(&[], "anything"), 0.0);

        let bare = SourceDocument::new("x".repeat(1000));
        let full = SourceDocument::new("x".repeat(1000))
            .with_source_file("report.pdf")
            .with_page("4")
            .with_file_type("pdf");
        let placeholder_page = SourceDocument::new("x".repeat(1000)).with_page("N/A");
        let first_page = SourceDocument::new("x".repeat(1000)).with_page("0");

        // no query terms -> term match 0.5
        assert!(approx(source_quality(&[bare], ""), 0.25 + 0.3 + 0.1));
        assert!(approx(source_quality(&[full], ""), 0.25 + 0.3 + 0.2));
        assert!(approx(source_quality(&[placeholder_page], ""), 0.25 + 0.3 + 0.1));
        assert!(approx(source_quality(&[first_page], ""), 0.25 + 0.3 + 0.1));
    }

    #[test]
    fn test_overall_weights() {
        let scores = SubScores {
            relevance: 1.0,
            completeness: 1.0,
            accuracy: 1.0,
            clarity: 1.0,
            source_quality: 1.0,
        };
        assert!(approx(scores.overall(), 1.0));

        let scores = SubScores {
            relevance: 0.0,
            completeness: 0.0,
            accuracy: 0.0,
            clarity: 0.0,
            source_quality: 1.0,
        };
        assert!(approx(scores.overall(), 0.15));
    }

    #[test]
    fn test_overall_is_monotonic_per_sub_score() {
        let base = SubScores {
            relevance: 0.5,
            completeness: 0.5,
            accuracy: 0.5,
            clarity: 0.5,
            source_quality: 0.5,
        };
        let bumps: [fn(&mut SubScores); 5] = [
            |s| s.relevance = 0.9,
            |s| s.completeness = 0.9,
            |s| s.accuracy = 0.9,
            |s| s.clarity = 0.9,
            |s| s.source_quality = 0.9,
        ];
        for bump in bumps {
            let mut raised = base;
            bump(&mut raised);
            assert!(raised.overall() >= base.overall());
        }
    }
}
