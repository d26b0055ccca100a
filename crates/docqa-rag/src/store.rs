//! In-memory retriever

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

use docqa_core::{Error, Result, Retriever, SourceDocument};

/// Size of a document collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionStats {
    pub total_documents: usize,
    pub total_sources: usize,
}

#[derive(Default)]
struct Collection {
    documents: Vec<SourceDocument>,
    content_hashes: HashSet<String>,
}

/// Local in-memory retriever scoring passages by query-word overlap
pub struct InMemoryRetriever {
    collection: RwLock<Collection>,
    score_threshold: Option<f32>,
}

impl InMemoryRetriever {
    /// Create an empty retriever
    pub fn new() -> Self {
        Self {
            collection: RwLock::new(Collection::default()),
            score_threshold: None,
        }
    }

    /// Only return passages scoring at least `threshold`
    pub fn with_score_threshold(mut self, threshold: f32) -> Self {
        self.score_threshold = Some(threshold);
        self
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Collection>> {
        self.collection
            .read()
            .map_err(|e| Error::Retriever(format!("Lock error: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Collection>> {
        self.collection
            .write()
            .map_err(|e| Error::Retriever(format!("Lock error: {}", e)))
    }

    /// Add passages; returns how many are stored afterwards
    pub fn add_documents(&self, documents: Vec<SourceDocument>) -> Result<usize> {
        let mut collection = self.write()?;
        collection.documents.extend(documents);
        Ok(collection.documents.len())
    }

    /// Add the passages of one source unless a source with the same content
    /// hash is already stored. Returns `false` for a duplicate.
    pub fn add_source(&self, content_hash: &str, documents: Vec<SourceDocument>) -> Result<bool> {
        let mut collection = self.write()?;
        if !collection.content_hashes.insert(content_hash.to_string()) {
            return Ok(false);
        }
        collection.documents.extend(documents);
        Ok(true)
    }

    /// Remove every stored passage
    pub fn clear(&self) -> Result<()> {
        let mut collection = self.write()?;
        collection.documents.clear();
        collection.content_hashes.clear();
        Ok(())
    }

    /// Passage count and number of distinct source files
    pub fn stats(&self) -> Result<CollectionStats> {
        let collection = self.read()?;
        let sources: BTreeSet<&str> = collection
            .documents
            .iter()
            .filter_map(|doc| doc.metadata.source_file.as_deref())
            .collect();

        Ok(CollectionStats {
            total_documents: collection.documents.len(),
            total_sources: sources.len(),
        })
    }

    /// Fraction of the query's words that occur in the content
    fn text_similarity(query: &str, content: &str) -> f32 {
        let query_lower = query.to_lowercase();
        let content_lower = content.to_lowercase();

        let query_words: Vec<&str> = query_lower.split_whitespace().collect();
        if query_words.is_empty() {
            return 0.0;
        }

        let matches = query_words
            .iter()
            .filter(|word| content_lower.contains(*word))
            .count();

        matches as f32 / query_words.len() as f32
    }
}

impl Default for InMemoryRetriever {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Retriever for InMemoryRetriever {
    async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<SourceDocument>> {
        let collection = self.read()?;

        let threshold = self.score_threshold.unwrap_or(0.0);
        let mut scored: Vec<(f32, &SourceDocument)> = collection
            .documents
            .iter()
            .map(|doc| (Self::text_similarity(query, &doc.content), doc))
            .filter(|(score, _)| *score > 0.0 && *score >= threshold)
            .collect();

        // stable sort keeps insertion order among equal scores
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored.truncate(k);

        debug!(query, k, hits = scored.len(), "retrieved passages");

        Ok(scored.into_iter().map(|(_, doc)| doc.clone()).collect())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.read()?.documents.len())
    }
}
