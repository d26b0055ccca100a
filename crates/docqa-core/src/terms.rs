//! Lexical term and fact extraction
//!
//! Relevance is approximated by term overlap rather than embeddings, so the
//! classifier and the quality scorer both lean on these two functions.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "is", "are", "was", "were", "be", "been", "have", "has", "had", "do", "does", "did", "will",
    "would", "could", "should", "may", "might", "can", "what", "how", "when", "where", "why",
    "who",
];

/// Maximum number of facts returned by [`extract_key_facts`].
pub const MAX_KEY_FACTS: usize = 5;

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[a-zA-Z]{3,}\b").unwrap());

static FACT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\b\d+\b",
        r"\b(is|are|was|were)\s+\w+",
        r"\b(contains|includes|has|have)\s+\w+",
    ]
    .into_iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Lower-cased alphabetic tokens of three or more letters, minus stop words.
pub fn extract_key_terms(text: &str) -> BTreeSet<String> {
    let lower = text.to_lowercase();
    WORD.find_iter(&lower)
        .map(|m| m.as_str())
        .filter(|word| !STOP_WORDS.contains(word))
        .map(str::to_string)
        .collect()
}

/// First five sentences that look like factual statements.
///
/// A sentence qualifies when it is longer than ten characters after trimming
/// and contains a number, an "is/are/was/were" statement or a
/// "contains/includes/has/have" statement.
pub fn extract_key_facts(text: &str) -> Vec<String> {
    text.split('.')
        .map(str::trim)
        .filter(|sentence| sentence.chars().count() > 10)
        .filter(|sentence| FACT_PATTERNS.iter().any(|p| p.is_match(sentence)))
        .take(MAX_KEY_FACTS)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_terms_filter_stop_words_and_short_tokens() {
        let terms = extract_key_terms("What is the capital of France? Is it Paris, or an old city?");
        let terms: Vec<_> = terms.into_iter().collect();
        assert_eq!(terms, vec!["capital", "city", "france", "old", "paris"]);
    }

    #[test]
    fn test_key_terms_deduplicate_case_insensitively() {
        let terms = extract_key_terms("Rust rust RUST borrow Borrow");
        assert_eq!(terms.len(), 2);
        assert!(terms.contains("rust"));
        assert!(terms.contains("borrow"));
    }

    #[test]
    fn test_key_terms_ignore_digits_and_mixed_tokens() {
        assert!(extract_key_terms("42 x86 v2").is_empty());
        assert!(extract_key_terms("").is_empty());
        assert!(extract_key_terms("   \n\t ").is_empty());
    }

    #[test]
    fn test_key_facts_patterns() {
        let text = "The tower is tall. Short one. It opened in 1889. \
                    The museum contains paintings. Nothing to see here at all";
        let facts = extract_key_facts(text);
        assert_eq!(
            facts,
            vec![
                "The tower is tall",
                "It opened in 1889",
                "The museum contains paintings",
            ]
        );
    }

    #[test]
    fn test_key_facts_limit_and_minimum_length() {
        let text = "Fact 1 is here. Fact 2 is here. Fact 3 is here. Fact 4 is here. \
                    Fact 5 is here. Fact 6 is here. It is 10.";
        let facts = extract_key_facts(text);
        assert_eq!(facts.len(), MAX_KEY_FACTS);
        assert_eq!(facts[0], "Fact 1 is here");
        assert_eq!(facts[4], "Fact 5 is here");

        // ten characters is still too short to count
        assert!(extract_key_facts("it is 1234.").is_empty());
        assert!(extract_key_facts("").is_empty());
    }
}
