//! OpenAI-compatible completion transport.
//!
//! Works with OpenAI itself and any endpoint exposing the same
//! `/chat/completions` contract (OpenRouter, vLLM, Ollama, ...).
//!
//! The transport is deliberately thin: it posts `{ model, messages }` with
//! bearer auth, returns the upstream JSON untouched on success, and on
//! failure pulls the nested `error.message` out of the upstream body so the
//! gateway can relay it.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};
use trellis_config::AppConfig;
use trellis_core::error::ProviderError;
use trellis_core::provider::{CompletionRequest, Provider};

/// An OpenAI-compatible completion endpoint.
pub struct OpenAiCompatProvider {
    name: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAiCompatProvider {
    /// Create a new provider with explicit timeouts.
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| ProviderError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            name: name.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Create an OpenAI provider with the default timeouts.
    pub fn openai() -> Result<Self, ProviderError> {
        Self::new(
            "openai",
            "https://api.openai.com/v1",
            Duration::from_secs(120),
            Duration::from_secs(10),
        )
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

/// Build the transport described by the configuration.
pub fn build_from_config(config: &AppConfig) -> Result<OpenAiCompatProvider, ProviderError> {
    OpenAiCompatProvider::new(
        "openai",
        &config.api_url,
        Duration::from_secs(config.upstream.timeout_secs),
        Duration::from_secs(config.upstream.connect_timeout_secs),
    )
}

/// Extract `error.message` from an upstream error body, if it is JSON and
/// carries one.
pub fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")?
        .get("message")?
        .as_str()
        .map(str::to_string)
}

fn classify(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout(e.to_string())
    } else {
        ProviderError::Network(e.to_string())
    }
}

#[async_trait]
impl Provider for OpenAiCompatProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(
        &self,
        api_key: &str,
        request: &CompletionRequest,
    ) -> Result<serde_json::Value, ProviderError> {
        debug!(
            provider = %self.name,
            model = %request.model,
            messages = request.messages.len(),
            "Sending completion request"
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %error_body, "Provider returned error");
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: extract_error_message(&error_body),
            });
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(e.to_string())
                } else {
                    ProviderError::InvalidResponse(e.to_string())
                }
            })
    }
}
