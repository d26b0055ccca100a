//! Question answering pipeline and terminal interface for DocQA

mod history;
mod logging;
mod pipeline;
mod ui;


pub use history::{
    AnswerMetadata, ChatHistory, ChatMessage, ChatStatistics, Favorite, Role,
    DEFAULT_CONTEXT_MESSAGES, DEFAULT_SEARCH_LIMIT,
};
pub use logging::init_tracing;
pub use pipeline::{QaPipeline, QaResponse, DEFAULT_SEARCH_K, NO_DOCUMENTS_MESSAGE};
pub use ui::{
    percent, print_analysis, print_chat_statistics, print_collection_stats, print_favorites,
    print_gated, print_messages, print_metrics, print_response, print_sources,
};

// Re-export core types
pub use docqa_core::{Error, Result};
