//! Gemini text-generation provider

use async_trait::async_trait;
use serde::Deserialize;

use super::http_client::HttpClientTrait;
use crate::config::ProviderConfig;
use crate::domain::{EngineError, TextGenerator};

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Gemini `generateContent` provider.
///
/// The credential is injected at construction and checked before any request
/// goes out; a blank key fails the call immediately with a configuration
/// error rather than a doomed network round trip.
#[derive(Debug)]
pub struct GeminiClient<C: HttpClientTrait> {
    client: C,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_output_tokens: u32,
}

impl<C: HttpClientTrait> GeminiClient<C> {
    pub fn new(client: C, config: &ProviderConfig) -> Self {
        Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        }
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }

    fn build_request(&self, prompt: &str) -> serde_json::Value {
        serde_json::json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": {
                "temperature": self.temperature,
                "maxOutputTokens": self.max_output_tokens,
            }
        })
    }

    fn parse_response(&self, json: serde_json::Value) -> Result<String, EngineError> {
        let response: GenerateContentResponse = serde_json::from_value(json)
            .map_err(|e| EngineError::provider(format!("Failed to parse response: {e}")))?;

        let text = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text);

        match text {
            Some(text) if !text.trim().is_empty() => Ok(text.trim().to_string()),
            _ => Err(EngineError::EmptyResponse),
        }
    }
}

#[async_trait]
impl<C: HttpClientTrait> TextGenerator for GeminiClient<C> {
    async fn generate(&self, prompt: &str) -> Result<String, EngineError> {
        if self.api_key.trim().is_empty() {
            return Err(EngineError::configuration("Gemini API key not configured"));
        }

        if prompt.is_empty() {
            return Err(EngineError::invalid_input("prompt must be non-empty"));
        }

        let url = self.generate_url();
        let body = self.build_request(prompt);
        let response = self.client.post_json(&url, &body).await?;

        self.parse_response(response)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }
}

// Gemini API types

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http_client::mock::MockHttpClient;

    fn test_config() -> ProviderConfig {
        ProviderConfig {
            api_key: "test-key".to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            temperature: 0.7,
            max_output_tokens: 1024,
        }
    }

    fn test_url() -> String {
        format!(
            "{DEFAULT_GEMINI_BASE_URL}/v1beta/models/{DEFAULT_GEMINI_MODEL}:generateContent?key=test-key"
        )
    }

    fn completion_json(text: &str) -> serde_json::Value {
        serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [{ "text": text }],
                    "role": "model"
                },
                "finishReason": "STOP"
            }]
        })
    }

    #[tokio::test]
    async fn test_generate_success_trims_output() {
        let client = MockHttpClient::new().with_response(test_url(), completion_json("  hello world \n"));
        let provider = GeminiClient::new(client, &test_config());

        let output = provider.generate("Clean this").await.unwrap();
        assert_eq!(output, "hello world");
    }

    #[tokio::test]
    async fn test_generate_sends_generation_config() {
        let client = MockHttpClient::new().with_response(test_url(), completion_json("ok"));
        let provider = GeminiClient::new(client, &test_config());

        provider.generate("prompt text").await.unwrap();

        let requests = provider.client.requests();
        assert_eq!(requests.len(), 1);

        let body = &requests[0].1;
        assert_eq!(body["contents"][0]["parts"][0]["text"], "prompt text");
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 1024);
        assert!((body["generationConfig"]["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_without_request() {
        let config = ProviderConfig {
            api_key: String::new(),
            ..test_config()
        };
        let client = MockHttpClient::new();
        let provider = GeminiClient::new(client, &config);

        let err = provider.generate("hello").await.unwrap_err();
        assert_eq!(
            err,
            EngineError::configuration("Gemini API key not configured")
        );
        assert!(provider.client.requests().is_empty());
    }

    #[tokio::test]
    async fn test_empty_prompt_rejected() {
        let client = MockHttpClient::new();
        let provider = GeminiClient::new(client, &test_config());

        let err = provider.generate("").await.unwrap_err();
        assert_eq!(err, EngineError::invalid_input("prompt must be non-empty"));
    }

    #[tokio::test]
    async fn test_empty_candidates_is_empty_response() {
        let client =
            MockHttpClient::new().with_response(test_url(), serde_json::json!({ "candidates": [] }));
        let provider = GeminiClient::new(client, &test_config());

        let err = provider.generate("hello").await.unwrap_err();
        assert_eq!(err, EngineError::EmptyResponse);
    }

    #[tokio::test]
    async fn test_blank_text_is_empty_response() {
        let client = MockHttpClient::new().with_response(test_url(), completion_json("   "));
        let provider = GeminiClient::new(client, &test_config());

        let err = provider.generate("hello").await.unwrap_err();
        assert_eq!(err, EngineError::EmptyResponse);
    }

    #[tokio::test]
    async fn test_rate_limit_error_passes_through() {
        let client = MockHttpClient::new()
            .with_error(test_url(), EngineError::rate_limited(429, "quota"));
        let provider = GeminiClient::new(client, &test_config());

        let err = provider.generate("hello").await.unwrap_err();
        assert!(err.is_transient());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = ProviderConfig {
            base_url: "http://localhost:9999/".to_string(),
            ..test_config()
        };
        let provider = GeminiClient::new(MockHttpClient::new(), &config);
        assert!(provider
            .generate_url()
            .starts_with("http://localhost:9999/v1beta/"));
    }
}
