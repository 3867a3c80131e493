//! Image generation through the image provider.

use std::sync::Arc;

use charpack_core::generation::ImageRequest;
use charpack_core::image_urls::extract_image_urls;

use crate::ports::ImageGenerator;
use crate::PipelineError;

/// Requests images and normalizes the provider response to a URL list.
#[derive(Clone)]
pub struct ImageGenerationClient {
    images: Arc<dyn ImageGenerator>,
}

impl ImageGenerationClient {
    pub fn new(images: Arc<dyn ImageGenerator>) -> Self {
        Self { images }
    }

    /// Generate `count` images for `prompt` at the fixed size and quality.
    ///
    /// Provider errors propagate. A response with no recognizable URLs is
    /// not an error and yields an empty list.
    pub async fn generate(&self, prompt: &str, count: u32) -> Result<Vec<String>, PipelineError> {
        let request = ImageRequest::new(prompt, count);
        let response = self.images.generate_images(&request).await?;

        let urls = extract_image_urls(&response);
        if urls.is_empty() {
            tracing::warn!(requested = count, "Image provider response contained no image URLs");
        } else {
            tracing::debug!(requested = count, received = urls.len(), "Image URLs extracted");
        }
        Ok(urls)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use charpack_providers::ProviderError;
    use serde_json::{json, Value};

    use super::*;

    struct RecordingImages {
        response: Option<Value>,
        requests: Mutex<Vec<ImageRequest>>,
    }

    #[async_trait]
    impl ImageGenerator for RecordingImages {
        async fn generate_images(&self, request: &ImageRequest) -> Result<Value, ProviderError> {
            self.requests.lock().unwrap().push(request.clone());
            self.response.clone().ok_or(ProviderError::Api {
                status: 500,
                body: "boom".to_string(),
            })
        }
    }

    fn client(response: Option<Value>) -> (ImageGenerationClient, Arc<RecordingImages>) {
        let images = Arc::new(RecordingImages {
            response,
            requests: Mutex::new(Vec::new()),
        });
        (ImageGenerationClient::new(images.clone()), images)
    }

    #[tokio::test]
    async fn merges_direct_and_diagnostic_urls() {
        let payload = r#"[{"imageURL":"https://cdn/b.png"}]"#;
        let (client, images) = client(Some(json!({
            "images": [{"url": "https://cdn/a.png"}],
            "warnings": [{"message": format!("Response data: {payload}")}]
        })));

        let urls = client.generate("hero", 2).await.unwrap();

        assert_eq!(urls, vec!["https://cdn/a.png", "https://cdn/b.png"]);
        let requests = images.requests.lock().unwrap();
        assert_eq!(requests[0].count, 2);
        assert_eq!(requests[0].size(), "1024x1024");
    }

    #[tokio::test]
    async fn unrecognized_shape_yields_empty_list() {
        let (client, _) = client(Some(json!({"status": "ok"})));
        assert!(client.generate("hero", 4).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn provider_error_propagates() {
        let (client, _) = client(None);
        let err = client.generate("hero", 4).await.unwrap_err();
        assert_matches!(err, PipelineError::Provider(ProviderError::Api { status: 500, .. }));
    }
}
