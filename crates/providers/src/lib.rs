//! HTTP clients for the external AI providers.
//!
//! - [`gemini::GeminiClient`] -- text generation (prompt enhancement and
//!   image metadata).
//! - [`runware::RunwareClient`] -- image generation.
//!
//! Both clients return [`ProviderError`] and leave fallback decisions to
//! their callers.

use std::time::Duration;

pub mod gemini;
pub mod runware;

/// Default timeout applied to every provider request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Errors from a provider call.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status or an error payload.
    #[error("Provider API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body (or error payload) for debugging.
        body: String,
    },

    /// The provider answered successfully but without usable content.
    #[error("Empty provider response: {0}")]
    EmptyResponse(String),

    /// The client has no API key configured.
    #[error("Provider not configured: {0} is not set")]
    NotConfigured(&'static str),
}

/// Build a [`reqwest::Client`] with the given request timeout.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client, ProviderError> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}

/// Read an environment variable, treating blank values as unset.
pub(crate) fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Ensure the response has a success status code. Returns the response
/// unchanged on success, or a [`ProviderError::Api`] containing the status
/// and body text on failure.
pub(crate) async fn ensure_success(
    response: reqwest::Response,
) -> Result<reqwest::Response, ProviderError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        return Err(ProviderError::Api {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}

/// Parse a successful JSON response body into the expected type.
pub(crate) async fn parse_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ProviderError> {
    let response = ensure_success(response).await?;
    Ok(response.json::<T>().await?)
}
