//! Client for the Gemini `generateContent` REST endpoint.

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;

use crate::{env_non_empty, http_client, parse_response, ProviderError, DEFAULT_TIMEOUT};

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini connection settings.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key; `None` makes every call fail with [`ProviderError::NotConfigured`].
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                                              |
    /// |--------------------------|------------------------------------------------------|
    /// | `GEMINI_API_KEY`         | falls back to `GOOGLE_API_KEY`, else unset           |
    /// | `GEMINI_MODEL`           | `gemini-2.0-flash`                                   |
    /// | `GEMINI_BASE_URL`        | `https://generativelanguage.googleapis.com/v1beta`   |
    /// | `PROVIDER_TIMEOUT_SECS`  | `120`                                                |
    pub fn from_env() -> Self {
        let timeout = env_non_empty("PROVIDER_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        Self {
            api_key: env_non_empty("GEMINI_API_KEY").or_else(|| env_non_empty("GOOGLE_API_KEY")),
            model: env_non_empty("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into()),
            base_url: env_non_empty("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into()),
            timeout,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    parts: Option<Vec<Part>>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Text-generation client for a single Gemini model.
pub struct GeminiClient {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        let client = http_client(config.timeout)?;
        Ok(Self { client, config })
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: GeminiConfig) -> Self {
        Self { client, config }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Send a single-turn prompt and return the concatenated reply text.
    pub async fn generate_text(&self, prompt: &str) -> Result<String, ProviderError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(ProviderError::NotConfigured("GEMINI_API_KEY"))?;

        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        );

        tracing::debug!(model = %self.config.model, prompt_len = prompt.len(), "Calling Gemini");

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", api_key)
            .json(&build_request_body(prompt))
            .send()
            .await?;

        let body: GenerateContentResponse = parse_response(response).await?;
        extract_text(body)
            .ok_or_else(|| ProviderError::EmptyResponse("Gemini returned no text parts".into()))
    }
}

fn build_request_body(prompt: &str) -> serde_json::Value {
    json!({
        "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
    })
}

/// Concatenate the text parts of the first candidate.
fn extract_text(response: GenerateContentResponse) -> Option<String> {
    let parts = response
        .candidates?
        .into_iter()
        .next()?
        .content?
        .parts?;

    let text: String = parts.into_iter().filter_map(|p| p.text).collect();
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}
