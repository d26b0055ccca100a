//! Local retrieval collaborator for DocQA
//!
//! This crate provides a lexical in-memory retriever, a text/markdown indexer
//! that feeds it, and helpers to turn retrieved passages into prompt context
//! and display summaries.

mod context;
mod indexer;
mod store;


pub use context::{build_context, retrieval_confidence, search_similar, SourceSummary};
pub use indexer::{IndexingConfig, IndexingReport, TextIndexer};
pub use store::{CollectionStats, InMemoryRetriever};

// Re-export core types for convenience
pub use docqa_core::{Error, Result, Retriever, SourceDocument, SourceMetadata};
