//! Snapshot tests for the OpenAI client

#[cfg(test)]
mod snapshot_tests {
    use crate::client::OpenAiClient;
    use crate::{GenerationConfig, OpenAiConfig};
    use insta::assert_yaml_snapshot;

    #[test]
    fn test_config_snapshot() {
        let config = OpenAiConfig {
            api_key: "test_api_key_redacted".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4-turbo-preview".to_string(),
            timeout_secs: 60,
        };

        assert_yaml_snapshot!(config, @r###"
        ---
        api_key: test_api_key_redacted
        base_url: "https://api.openai.com/v1"
        model: gpt-4-turbo-preview
        timeout_secs: 60
        "###);
    }

    #[test]
    fn test_request_body() {
        let config = GenerationConfig {
            model_id: "gpt-4-turbo-preview".to_string(),
            max_tokens: 800,
            temperature: 0.0,
            ..GenerationConfig::default()
        };
        let request = OpenAiClient::build_request("Context: ...\n\nQuestion: Why?", &config);

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "model": "gpt-4-turbo-preview",
                "messages": [{"role": "user", "content": "Context: ...\n\nQuestion: Why?"}],
                "temperature": 0.0,
                "max_tokens": 800,
            })
        );
    }
}
