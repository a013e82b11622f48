//! HTTP client seam with provider-error classification

use async_trait::async_trait;

use crate::domain::EngineError;

/// Trait for HTTP client operations (for mocking)
#[async_trait]
pub trait HttpClientTrait: Send + Sync + std::fmt::Debug {
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, EngineError>;
}

/// Real HTTP client using reqwest.
///
/// Non-success statuses are classified here: 429 and 503 become
/// [`EngineError::RateLimited`] (transient), anything else including
/// transport and decode failures is permanent.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClientTrait for HttpClient {
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, EngineError> {
        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| EngineError::provider(format!("Request failed: {e}")))?;

        let status = response.status();

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();

            return Err(classify_status(status.as_u16(), error_body));
        }

        response
            .json()
            .await
            .map_err(|e| EngineError::provider(format!("Failed to parse response: {e}")))
    }
}

/// Map a non-success HTTP status to the engine's error taxonomy
pub fn classify_status(status: u16, body: String) -> EngineError {
    match status {
        429 | 503 => EngineError::rate_limited(status, body),
        _ => EngineError::provider(format!("HTTP {status}: {body}")),
    }
}
