//! Seams between the pipeline and the outside world.
//!
//! Production wires the Gemini and Runware clients and [`crate::store::PgPackStore`];
//! tests substitute in-memory fakes.

use async_trait::async_trait;
use charpack_core::generation::ImageRequest;
use charpack_core::pack::PackStatus;
use charpack_core::types::{DbId, Timestamp};
use charpack_db::models::image::CreateGeneratedImage;
use charpack_providers::gemini::GeminiClient;
use charpack_providers::runware::RunwareClient;
use charpack_providers::ProviderError;
use serde_json::Value;

use crate::PipelineError;

// ---------------------------------------------------------------------------
// Providers
// ---------------------------------------------------------------------------

/// A generative text model.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_text(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// An image model. Returns the provider's raw response body; URL extraction
/// happens in [`crate::images::ImageGenerationClient`].
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate_images(&self, request: &ImageRequest) -> Result<Value, ProviderError>;
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate_text(&self, prompt: &str) -> Result<String, ProviderError> {
        GeminiClient::generate_text(self, prompt).await
    }
}

#[async_trait]
impl ImageGenerator for RunwareClient {
    async fn generate_images(&self, request: &ImageRequest) -> Result<Value, ProviderError> {
        RunwareClient::generate_images(self, request).await
    }
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

/// The writes the generator performs.
#[async_trait]
pub trait PackStore: Send + Sync {
    /// Move a pack to `status`. Returns `false` when the store refused the
    /// transition (unknown pack or not an allowed predecessor).
    async fn update_pack_status(
        &self,
        pack_id: DbId,
        status: PackStatus,
        completed_at: Option<Timestamp>,
    ) -> Result<bool, PipelineError>;

    /// Persist one generated image, returning its id.
    async fn insert_generated_image(
        &self,
        image: &CreateGeneratedImage,
    ) -> Result<DbId, PipelineError>;
}
