use axum::extract::State;
use axum::Json;
use charpack_core::error::CoreError;
use charpack_core::pack::DEFAULT_STYLE;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EnhancePromptRequest {
    pub prompt: Option<String>,
    #[serde(default)]
    pub characters: Vec<String>,
    pub style: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancePromptResponse {
    pub enhanced_prompt: String,
}

/// POST /api/enhance-prompt
///
/// Enhancement itself never fails; a provider outage returns the prompt
/// unchanged.
pub async fn enhance(
    State(state): State<AppState>,
    AppJson(input): AppJson<EnhancePromptRequest>,
) -> AppResult<Json<EnhancePromptResponse>> {
    let prompt = input
        .prompt
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| CoreError::Validation("Prompt is required".into()))?;

    let style = input
        .style
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_STYLE);

    let enhanced_prompt = state
        .enhancer
        .enhance(prompt, &input.characters, style)
        .await;

    Ok(Json(EnhancePromptResponse { enhanced_prompt }))
}
