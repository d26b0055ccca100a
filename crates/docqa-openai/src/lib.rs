//! OpenAI integration for DocQA
//!
//! This crate provides the OpenAI-compatible implementation of the Generator trait.

mod client;
mod config;

#[cfg(test)]
mod tests;

pub use client::OpenAiClient;
pub use config::{OpenAiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};

// Re-export core types for convenience
pub use docqa_core::{Error, GenerationConfig, GenerationResult, Generator, Result};
