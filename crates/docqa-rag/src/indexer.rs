//! Local text and markdown indexer

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

use docqa_core::{Error, Result, SourceDocument};

use crate::InMemoryRetriever;

const SUPPORTED_EXTENSIONS: &[&str] = &["txt", "md", "markdown"];

/// Chunking configuration. Overlap is always smaller than a non-zero chunk size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawIndexingConfig")]
pub struct IndexingConfig {
    chunk_size: usize,
    chunk_overlap: usize,
}

#[derive(Deserialize)]
struct RawIndexingConfig {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl TryFrom<RawIndexingConfig> for IndexingConfig {
    type Error = Error;

    fn try_from(raw: RawIndexingConfig) -> Result<Self> {
        Self::new(raw.chunk_size, raw.chunk_overlap)
    }
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

impl IndexingConfig {
    /// Read `CHUNK_SIZE` and `CHUNK_OVERLAP`, falling back to the defaults
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        let chunk_size = read_usize("CHUNK_SIZE")?.unwrap_or(defaults.chunk_size);
        let chunk_overlap = read_usize("CHUNK_OVERLAP")?.unwrap_or(defaults.chunk_overlap);

        Self::new(chunk_size, chunk_overlap)
    }

    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 || chunk_overlap >= chunk_size {
            return Err(Error::Configuration(format!(
                "chunk overlap ({}) must be smaller than a non-zero chunk size ({})",
                chunk_overlap, chunk_size
            )));
        }
        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }
}

fn read_usize(name: &str) -> Result<Option<usize>> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| Error::Configuration(format!("{} must be a whole number, got '{}'", name, value))),
        Err(_) => Ok(None),
    }
}

/// Outcome of an indexing run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexingReport {
    pub files_indexed: usize,
    pub chunks: usize,
    pub files_failed: usize,
    /// Files whose content was already indexed
    pub files_skipped: usize,
    pub errors: Vec<String>,
}

/// Loads local text files, chunks them and stores the chunks for retrieval
pub struct TextIndexer {
    retriever: Arc<InMemoryRetriever>,
    config: IndexingConfig,
}

impl TextIndexer {
    pub fn new(retriever: Arc<InMemoryRetriever>) -> Self {
        Self {
            retriever,
            config: IndexingConfig::default(),
        }
    }

    pub fn with_config(mut self, config: IndexingConfig) -> Self {
        self.config = config;
        self
    }

    /// Index a single file or every supported file below a directory.
    ///
    /// Files whose content hash was indexed before are skipped.
    pub fn index_path(&self, path: impl AsRef<Path>) -> Result<IndexingReport> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::Indexing(format!("{} does not exist", path.display())));
        }

        let mut files = Vec::new();
        collect_files(path, &mut files)?;
        files.sort();

        let mut report = IndexingReport::default();
        for file in files {
            match self.load_file(&file) {
                Ok((content_hash, chunks)) => {
                    let count = chunks.len();
                    if self.retriever.add_source(&content_hash, chunks)? {
                        report.files_indexed += 1;
                        report.chunks += count;
                    } else {
                        debug!(file = %file.display(), "already indexed, skipping");
                        report.files_skipped += 1;
                    }
                }
                Err(e) => {
                    warn!(file = %file.display(), error = %e, "failed to index file");
                    report.files_failed += 1;
                    report.errors.push(format!("{}: {}", file.display(), e));
                }
            }
        }

        info!(
            files = report.files_indexed,
            chunks = report.chunks,
            failed = report.files_failed,
            skipped = report.files_skipped,
            "indexing complete"
        );
        Ok(report)
    }

    /// Index in-memory text as if it came from `source_file`.
    ///
    /// Returns the number of chunks added, 0 when the same text was indexed before.
    pub fn index_text(&self, content: &str, source_file: &str, file_type: &str) -> Result<usize> {
        let chunks = self.chunk(content, source_file, file_type);
        let count = chunks.len();
        if self.retriever.add_source(&content_hash(content.as_bytes()), chunks)? {
            Ok(count)
        } else {
            Ok(0)
        }
    }

    fn load_file(&self, path: &Path) -> Result<(String, Vec<SourceDocument>)> {
        let content = fs::read_to_string(path)?;
        let source_file = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        let file_type = extension(path).unwrap_or_default();

        Ok((
            content_hash(content.as_bytes()),
            self.chunk(&content, &source_file, &file_type),
        ))
    }

    /// Split text into overlapping character windows
    fn chunk(&self, content: &str, source_file: &str, file_type: &str) -> Vec<SourceDocument> {
        let chars: Vec<char> = content.chars().collect();
        let size = self.config.chunk_size.max(1);
        let step = size.saturating_sub(self.config.chunk_overlap).max(1);

        let mut chunks = Vec::new();
        let mut start = 0;
        while start < chars.len() {
            let end = (start + size).min(chars.len());
            let text: String = chars[start..end].iter().collect();
            if !text.trim().is_empty() {
                chunks.push(
                    SourceDocument::new(text.trim())
                        .with_source_file(source_file)
                        .with_file_type(file_type),
                );
            }
            if end == chars.len() {
                break;
            }
            start += step;
        }

        chunks
    }
}

/// Hex MD5 of file content, used to recognise files that were already indexed
fn content_hash(content: &[u8]) -> String {
    format!("{:x}", md5::compute(content))
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
}

fn collect_files(path: &Path, files: &mut Vec<std::path::PathBuf>) -> Result<()> {
    if path.is_dir() {
        for entry in fs::read_dir(path)? {
            collect_files(&entry?.path(), files)?;
        }
    } else if extension(path).is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str())) {
        files.push(path.to_path_buf());
    }
    Ok(())
}
