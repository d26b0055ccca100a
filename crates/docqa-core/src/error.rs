//! Error types for DocQA

use thiserror::Error;

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the collaborators around the decision core.
///
/// Query analysis and quality assessment are total and never produce one of
/// these; only retrieval, indexing, generation and the pipeline do.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Generator error: {0}")]
    Generator(String),

    #[error("Retriever error: {0}")]
    Retriever(String),

    #[error("Indexing error: {0}")]
    Indexing(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Timeout error: {0}")]
    Timeout(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
