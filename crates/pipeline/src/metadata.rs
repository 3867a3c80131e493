//! Per-image metadata through the text provider.

use std::sync::Arc;

use charpack_core::metadata::{fallback_metadata, parse_metadata, ImageMetadata, MetadataContext};
use charpack_core::prompts::metadata_prompt;

use crate::ports::TextGenerator;

/// Produces a title, description and tags for one generated image.
///
/// Never fails. A provider error yields the templated fallback; a reply goes
/// through [`parse_metadata`], which falls back on its own.
#[derive(Clone)]
pub struct MetadataSynthesizer {
    text: Arc<dyn TextGenerator>,
}

impl MetadataSynthesizer {
    pub fn new(text: Arc<dyn TextGenerator>) -> Self {
        Self { text }
    }

    pub async fn synthesize(
        &self,
        character_id: &str,
        prompt: &str,
        variation: i32,
        style: &str,
    ) -> ImageMetadata {
        let ctx = MetadataContext {
            character_id,
            style,
            variation,
        };
        let instruction = metadata_prompt(character_id, prompt, style, variation);

        match self.text.generate_text(&instruction).await {
            Ok(reply) => parse_metadata(&reply, &ctx),
            Err(e) => {
                tracing::warn!(
                    character_id,
                    variation,
                    error = %e,
                    "Metadata generation failed, using fallback",
                );
                fallback_metadata(&ctx)
            }
        }
    }
}
