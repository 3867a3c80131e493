//! Client for the Runware image inference REST API.
//!
//! The raw JSON body is returned as-is; locating image URLs inside it is the
//! job of [`charpack_core::image_urls`].

use std::time::Duration;

use charpack_core::generation::ImageRequest;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{env_non_empty, http_client, parse_response, ProviderError, DEFAULT_TIMEOUT};

pub const DEFAULT_MODEL: &str = "runware:101@1";
pub const DEFAULT_BASE_URL: &str = "https://api.runware.ai/v1";

/// Runware connection settings.
#[derive(Debug, Clone)]
pub struct RunwareConfig {
    /// API key; `None` makes every call fail with [`ProviderError::NotConfigured`].
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl RunwareConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                      |
    /// |--------------------------|------------------------------|
    /// | `RUNWARE_API_KEY`        | unset                        |
    /// | `RUNWARE_MODEL`          | `runware:101@1`              |
    /// | `RUNWARE_BASE_URL`       | `https://api.runware.ai/v1`  |
    /// | `PROVIDER_TIMEOUT_SECS`  | `120`                        |
    pub fn from_env() -> Self {
        let timeout = env_non_empty("PROVIDER_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        Self {
            api_key: env_non_empty("RUNWARE_API_KEY"),
            model: env_non_empty("RUNWARE_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into()),
            base_url: env_non_empty("RUNWARE_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into()),
            timeout,
        }
    }
}

/// Image generation client.
pub struct RunwareClient {
    client: reqwest::Client,
    config: RunwareConfig,
}

impl RunwareClient {
    pub fn new(config: RunwareConfig) -> Result<Self, ProviderError> {
        let client = http_client(config.timeout)?;
        Ok(Self { client, config })
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: RunwareConfig) -> Self {
        Self { client, config }
    }

    /// Submit one `imageInference` task and return the raw response body.
    pub async fn generate_images(&self, request: &ImageRequest) -> Result<Value, ProviderError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(ProviderError::NotConfigured("RUNWARE_API_KEY"))?;

        let task_uuid = Uuid::new_v4();
        let body = build_inference_tasks(&self.config.model, request, task_uuid);

        tracing::debug!(
            model = %self.config.model,
            task_uuid = %task_uuid,
            count = request.count,
            size = %request.size(),
            "Submitting Runware image inference",
        );

        let response = self
            .client
            .post(&self.config.base_url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let value: Value = parse_response(response).await?;
        check_task_errors(value)
    }
}

/// Build the task array for a single inference request.
fn build_inference_tasks(model: &str, request: &ImageRequest, task_uuid: Uuid) -> Value {
    json!([{
        "taskType": "imageInference",
        "taskUUID": task_uuid.to_string(),
        "positivePrompt": request.prompt,
        "model": model,
        "width": request.width,
        "height": request.height,
        "numberResults": request.count,
        "steps": request.steps,
        "CFGScale": request.guidance_scale,
        "scheduler": request.scheduler,
        "outputType": "URL",
    }])
}

/// Runware reports task failures in an `errors` array even on HTTP 200.
fn check_task_errors(value: Value) -> Result<Value, ProviderError> {
    match value.get("errors").and_then(Value::as_array) {
        Some(errors) if !errors.is_empty() => Err(ProviderError::Api {
            status: 200,
            body: Value::Array(errors.clone()).to_string(),
        }),
        _ => Ok(value),
    }
}
