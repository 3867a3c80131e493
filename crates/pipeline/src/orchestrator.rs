//! Pack generation orchestrator.
//!
//! One call to [`PackGenerator::generate`] takes a `pending` pack through
//! `generating` to `completed` or `failed`. Characters are processed in
//! order, one at a time; images are persisted as soon as each character's
//! batch is ready, so a failed pack keeps whatever was written before the
//! failure.

use std::sync::Arc;

use charpack_core::catalog::base_prompt_for;
use charpack_core::pack::{PackSettings, PackStatus};
use charpack_core::types::DbId;
use charpack_db::models::image::CreateGeneratedImage;
use chrono::Utc;

use crate::enhancer::PromptEnhancer;
use crate::images::ImageGenerationClient;
use crate::metadata::MetadataSynthesizer;
use crate::ports::{ImageGenerator, PackStore, TextGenerator};
use crate::PipelineError;

/// Drives the generation of a single pack.
pub struct PackGenerator {
    store: Arc<dyn PackStore>,
    enhancer: PromptEnhancer,
    images: ImageGenerationClient,
    metadata: MetadataSynthesizer,
}

impl PackGenerator {
    pub fn new(
        store: Arc<dyn PackStore>,
        text: Arc<dyn TextGenerator>,
        images: Arc<dyn ImageGenerator>,
    ) -> Self {
        Self {
            store,
            enhancer: PromptEnhancer::new(Arc::clone(&text)),
            images: ImageGenerationClient::new(images),
            metadata: MetadataSynthesizer::new(text),
        }
    }

    /// Generate every character of a pack and record the outcome on the
    /// pack's status. Errors never escape; they end as `failed`.
    pub async fn generate(&self, pack_id: DbId, characters: &[String], settings: &PackSettings) {
        match self.transition(pack_id, PackStatus::Generating).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!(pack_id, "Pack is not pending, skipping generation");
                return;
            }
            Err(e) => {
                tracing::error!(pack_id, error = %e, "Failed to start pack generation");
                return;
            }
        }

        match self.generate_characters(pack_id, characters, settings).await {
            Ok(image_count) => {
                tracing::info!(pack_id, image_count, "Pack generation finished");
                if let Err(e) = self.transition(pack_id, PackStatus::Completed).await {
                    tracing::error!(pack_id, error = %e, "Failed to mark pack completed");
                    self.mark_failed(pack_id).await;
                }
            }
            Err(e) => {
                tracing::error!(pack_id, error = %e, "Pack generation failed");
                self.mark_failed(pack_id).await;
            }
        }
    }

    async fn mark_failed(&self, pack_id: DbId) {
        if let Err(e) = self.transition(pack_id, PackStatus::Failed).await {
            tracing::error!(pack_id, error = %e, "Failed to mark pack failed");
        }
    }

    async fn generate_characters(
        &self,
        pack_id: DbId,
        characters: &[String],
        settings: &PackSettings,
    ) -> Result<usize, PipelineError> {
        let mut total = 0;
        for character_id in characters {
            total += self
                .generate_character(pack_id, character_id, settings)
                .await?;
        }
        Ok(total)
    }

    /// Enhance, generate and persist the images of one character. Returns the
    /// number of images persisted.
    async fn generate_character(
        &self,
        pack_id: DbId,
        character_id: &str,
        settings: &PackSettings,
    ) -> Result<usize, PipelineError> {
        let style = settings.style_or_default();
        let base_prompt = base_prompt_for(character_id);
        let enhanced_prompt = self
            .enhancer
            .enhance(&base_prompt, &[character_id.to_string()], style)
            .await;

        let urls = self
            .images
            .generate(&enhanced_prompt, settings.image_count())
            .await?;

        for (variation, image_url) in (1..).zip(urls.iter()) {
            let metadata = self
                .metadata
                .synthesize(character_id, &enhanced_prompt, variation, style)
                .await;

            let image = CreateGeneratedImage {
                pack_id,
                character_id: character_id.to_string(),
                image_url: image_url.clone(),
                variation,
                prompt: base_prompt.clone(),
                enhanced_prompt: Some(enhanced_prompt.clone()),
                title: Some(metadata.title),
                description: Some(metadata.description),
                tags: Some(metadata.tags),
            };
            self.store.insert_generated_image(&image).await?;
        }

        tracing::info!(pack_id, character_id, image_count = urls.len(), "Character images stored");
        Ok(urls.len())
    }

    async fn transition(&self, pack_id: DbId, status: PackStatus) -> Result<bool, PipelineError> {
        let completed_at = (status == PackStatus::Completed).then(Utc::now);
        let applied = self
            .store
            .update_pack_status(pack_id, status, completed_at)
            .await?;

        if applied {
            tracing::info!(pack_id, status = %status, "Pack status updated");
        } else {
            tracing::warn!(pack_id, status = %status, "Pack status transition rejected");
        }
        Ok(applied)
    }
}
