//! OpenAI chat completions client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::debug;

use docqa_core::{Error, GenerationConfig, GenerationResult, Generator, Result};

use crate::config::OpenAiConfig;

/// Generator backed by an OpenAI-compatible chat completions endpoint
pub struct OpenAiClient {
    config: OpenAiConfig,
    client: Client,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    pub choices: Vec<ChatChoice>,
    pub usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatChoice {
    pub message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponseMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatUsage {
    pub total_tokens: u32,
}

impl OpenAiClient {
    /// Create a new client from configuration
    pub fn new(config: OpenAiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Create a new client from environment variables
    pub fn from_env() -> Result<Self> {
        let config = OpenAiConfig::from_env()?;
        Self::new(config)
    }

    /// Set the model to use for generation
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub(crate) fn build_request<'a>(prompt: &'a str, config: &'a GenerationConfig) -> ChatRequest<'a> {
        ChatRequest {
            model: &config.model_id,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }

    /// Pull the answer text out of a completion response
    pub(crate) fn extract_answer(response: ChatResponse) -> Result<(String, Option<u32>)> {
        let tokens_used = response.usage.map(|usage| usage.total_tokens);
        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        let mut answer = content.trim();
        if let Some(rest) = answer.strip_prefix("Answer:") {
            answer = rest.trim();
        }

        if answer.is_empty() {
            return Err(Error::Generator("Empty completion from OpenAI API".to_string()));
        }

        Ok((answer.to_string(), tokens_used))
    }

    /// Perform the actual completion request
    async fn perform_generation(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<(String, Option<u32>)> {
        let url = format!("{}/chat/completions", self.config.base_url);
        let request_body = Self::build_request(prompt, config);

        debug!(model = %config.model_id, max_tokens = config.max_tokens, "requesting completion");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication(
                "OpenAI API rejected the API key".to_string(),
            ));
        }
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Error::Generator(format!(
                "OpenAI API request failed with status {}: {}",
                status, error_text
            )));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::Serialization(e.to_string()))?;

        Self::extract_answer(body)
    }
}

#[async_trait]
impl Generator for OpenAiClient {
    async fn generate(&self, prompt: &str, config: &GenerationConfig) -> Result<GenerationResult> {
        let generation_future = self.perform_generation(prompt, config);

        let (text, tokens_used) = match timeout(config.timeout, generation_future).await {
            Ok(result) => result?,
            Err(_) => return Err(Error::Timeout("Request timed out".to_string())),
        };

        Ok(GenerationResult {
            text,
            model_id: config.model_id.clone(),
            tokens_used,
        })
    }

    fn model_id(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: &str) -> ChatResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_extract_answer_strips_label() {
        let (text, tokens) = OpenAiClient::extract_answer(response(
            r#"{"choices":[{"message":{"role":"assistant","content":"Answer: Paris."}}],"usage":{"total_tokens":42}}"#,
        ))
        .unwrap();
        assert_eq!(text, "Paris.");
        assert_eq!(tokens, Some(42));
    }

    #[test]
    fn test_extract_answer_rejects_empty() {
        let err = OpenAiClient::extract_answer(response(r#"{"choices":[]}"#)).unwrap_err();
        assert!(matches!(err, Error::Generator(_)));

        let err = OpenAiClient::extract_answer(response(
            r#"{"choices":[{"message":{"content":null}}]}"#,
        ))
        .unwrap_err();
        assert!(matches!(err, Error::Generator(_)));
    }

    #[test]
    fn test_model_id() {
        let client = OpenAiClient::new(OpenAiConfig::new("key"))
            .unwrap()
            .with_model("gpt-4o-mini");
        assert_eq!(client.model_id(), "gpt-4o-mini");
    }
}
