//! Generator trait and types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::{ProcessingStrategy, Result};

/// Configuration for one generation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub model_id: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout: Duration,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model_id: "gpt-4-turbo-preview".to_string(),
            max_tokens: 2000,
            temperature: 0.1,
            timeout: Duration::from_secs(60),
        }
    }
}

impl GenerationConfig {
    /// Take the sampling temperature and token budget from a strategy.
    pub fn for_strategy(strategy: &ProcessingStrategy) -> Self {
        Self {
            max_tokens: strategy.max_tokens,
            temperature: strategy.temperature,
            ..Self::default()
        }
    }

    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }
}

/// Result of a generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResult {
    pub text: String,
    pub model_id: String,
    pub tokens_used: Option<u32>,
}

/// Trait for answer generators (OpenAI-compatible endpoints, local models, fakes in tests)
///
/// The generator drafts an answer from a fully rendered prompt. Retries, if
/// any, belong to the implementation.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Draft an answer for the rendered prompt
    async fn generate(&self, prompt: &str, config: &GenerationConfig) -> Result<GenerationResult>;

    /// Get the model ID being used
    fn model_id(&self) -> &str;
}
