//! Context building and source presentation

use serde::{Deserialize, Serialize};
use tracing::debug;

use docqa_core::{Result, Retriever, SourceDocument};

const PREVIEW_CHARS: usize = 500;

/// Numbered passages tagged with their source file, ready for a template's
/// `{context}` slot. Empty when nothing was retrieved.
pub fn build_context(sources: &[SourceDocument]) -> String {
    let mut context = String::new();

    for (i, doc) in sources.iter().enumerate() {
        context.push_str(&format!("{}. ", i + 1));

        if let Some(source_file) = &doc.metadata.source_file {
            context.push_str(&format!("[{}] ", source_file));
        }

        context.push_str(&doc.content);
        context.push_str("\n\n");
    }

    context.trim_end().to_string()
}

/// Display form of a retrieved passage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSummary {
    pub content: String,
    pub source: String,
    pub page: String,
    pub file_type: String,
}

impl From<&SourceDocument> for SourceSummary {
    fn from(doc: &SourceDocument) -> Self {
        let content = if doc.content.chars().count() > PREVIEW_CHARS {
            let preview: String = doc.content.chars().take(PREVIEW_CHARS).collect();
            format!("{}...", preview)
        } else {
            doc.content.clone()
        };

        Self {
            content,
            source: doc
                .metadata
                .source_file
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
            page: doc.metadata.page.clone().unwrap_or_else(|| "N/A".to_string()),
            file_type: doc
                .metadata
                .file_type
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
        }
    }
}

/// Passages similar to the query, ready for display. No answer is generated.
pub async fn search_similar<R: Retriever + ?Sized>(
    retriever: &R,
    query: &str,
    k: usize,
) -> Result<Vec<SourceSummary>> {
    let sources = retriever.retrieve(query, k).await?;
    debug!(k, retrieved = sources.len(), "similarity search");
    Ok(sources.iter().map(SourceSummary::from).collect())
}

/// Rough confidence in a retrieval from how much was found.
///
/// `min(0.95, 0.3 + n / 10 + avg_len / 2000)` rounded to two decimals, or 0
/// when nothing was retrieved.
pub fn retrieval_confidence(sources: &[SourceDocument]) -> f64 {
    if sources.is_empty() {
        return 0.0;
    }

    let total_len: usize = sources.iter().map(|doc| doc.content.chars().count()).sum();
    let avg_len = total_len as f64 / sources.len() as f64;
    let score = (0.3 + sources.len() as f64 / 10.0 + avg_len / 2000.0).min(0.95);

    (score * 100.0).round() / 100.0
}
