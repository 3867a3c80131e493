//! Prompt enhancement through the text provider.

use std::sync::Arc;

use charpack_core::prompts::enhancement_prompt;

use crate::ports::TextGenerator;

/// Rewrites base prompts into richer ones. Never fails: any provider error or
/// blank reply yields the base prompt unchanged.
#[derive(Clone)]
pub struct PromptEnhancer {
    text: Arc<dyn TextGenerator>,
}

impl PromptEnhancer {
    pub fn new(text: Arc<dyn TextGenerator>) -> Self {
        Self { text }
    }

    pub async fn enhance(&self, base_prompt: &str, characters: &[String], style: &str) -> String {
        let instruction = enhancement_prompt(base_prompt, characters, style);

        match self.text.generate_text(&instruction).await {
            Ok(reply) => {
                let reply = reply.trim();
                if reply.is_empty() {
                    tracing::warn!("Prompt enhancement returned no text, using base prompt");
                    base_prompt.to_string()
                } else {
                    reply.to_string()
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Prompt enhancement failed, using base prompt");
                base_prompt.to_string()
            }
        }
    }
}
