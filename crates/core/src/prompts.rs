//! Instruction templates sent to the text-generation provider.

/// Upper bound requested for enhanced prompts, in words.
pub const ENHANCED_PROMPT_MAX_WORDS: u32 = 200;

/// Instruction asking the text model to rewrite a base prompt.
pub fn enhancement_prompt(base_prompt: &str, characters: &[String], style: &str) -> String {
    format!(
        "Enhance this character description for high-quality {style} image generation.\n\
         \n\
         Base prompt: {base_prompt}\n\
         Characters: {characters}\n\
         Style: {style}\n\
         \n\
         Create a detailed, specific prompt that will generate high-quality character images \
         while maintaining the distinctive features and personality of each character. \
         Include details about poses, expressions, lighting, and artistic style. \
         Keep it under {ENHANCED_PROMPT_MAX_WORDS} words.",
        characters = characters.join(", "),
    )
}

/// Instruction asking the text model for a JSON title/description/tags object.
pub fn metadata_prompt(character_id: &str, prompt: &str, style: &str, variation: i32) -> String {
    format!(
        "Generate metadata for an AI-generated character image. \
         Respond with ONLY valid JSON, no markdown formatting or code blocks.\n\
         \n\
         Character: {character_id}\n\
         Prompt: {prompt}\n\
         Style: {style}\n\
         Variation: {variation}\n\
         \n\
         Return JSON with these exact fields:\n\
         {{\n  \
           \"title\": \"compelling descriptive title (max 60 chars)\",\n  \
           \"description\": \"detailed artistic description (100-150 words)\",\n  \
           \"tags\": [\"array\", \"of\", \"8-12\", \"relevant\", \"tags\"]\n\
         }}\n\
         \n\
         Title: engaging, describes pose/expression/action\n\
         Description: artistic, visual elements, mood, character traits\n\
         Tags: character name, style, pose, emotions, colors, themes\n\
         \n\
         IMPORTANT: Return only the JSON object, no other text or formatting."
    )
}
