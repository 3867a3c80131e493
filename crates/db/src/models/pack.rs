//! Character pack entity model and DTOs.

use charpack_core::pack::{PackSettings, PackStatus};
use charpack_core::types::{DbId, Timestamp, UserId};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

use crate::models::image::GeneratedImage;

/// A row from the `character_packs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterPack {
    pub id: DbId,
    pub user_id: Option<UserId>,
    pub name: String,
    /// Ordered character identifiers, never empty.
    pub characters: Json<Vec<String>>,
    pub settings: Json<PackSettings>,
    /// One of `pending`, `generating`, `completed`, `failed`.
    pub status: String,
    pub created_at: Timestamp,
    pub completed_at: Option<Timestamp>,
}

impl CharacterPack {
    /// Parsed lifecycle status. `None` only if the row holds an unknown value.
    pub fn status(&self) -> Option<PackStatus> {
        self.status.parse().ok()
    }
}

/// DTO for inserting a new pack. Packs always start `pending`.
#[derive(Debug, Clone)]
pub struct CreateCharacterPack {
    pub user_id: UserId,
    pub name: String,
    pub characters: Vec<String>,
    pub settings: PackSettings,
}

/// A pack together with its generated images, as returned by the detail
/// endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct CharacterPackWithImages {
    #[serde(flatten)]
    pub pack: CharacterPack,
    pub images: Vec<GeneratedImage>,
}
