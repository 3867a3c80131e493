//! Generated image entity model and DTOs.

use charpack_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `generated_images` table.
///
/// `pack_id` is nullable so images outlive a deleted pack.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedImage {
    pub id: DbId,
    pub pack_id: Option<DbId>,
    pub character_id: String,
    pub image_url: String,
    /// 1-based, dense per (pack, character).
    pub variation: i32,
    /// The base prompt before enhancement.
    pub prompt: String,
    pub enhanced_prompt: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Json<Vec<String>>>,
    pub created_at: Timestamp,
}

/// DTO for inserting a generated image.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateGeneratedImage {
    pub pack_id: DbId,
    pub character_id: String,
    pub image_url: String,
    pub variation: i32,
    pub prompt: String,
    pub enhanced_prompt: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
}
