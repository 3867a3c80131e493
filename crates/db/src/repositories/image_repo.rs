//! Repository for the `generated_images` table.

use charpack_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::image::{CreateGeneratedImage, GeneratedImage};

const COLUMNS: &str = "id, pack_id, character_id, image_url, variation, prompt, \
     enhanced_prompt, title, description, tags, created_at";

/// Provides insert and per-pack listing for generated images.
pub struct GeneratedImageRepo;

impl GeneratedImageRepo {
    /// Insert a generated image, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateGeneratedImage,
    ) -> Result<GeneratedImage, sqlx::Error> {
        let query = format!(
            "INSERT INTO generated_images
                (pack_id, character_id, image_url, variation, prompt,
                 enhanced_prompt, title, description, tags)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GeneratedImage>(&query)
            .bind(input.pack_id)
            .bind(&input.character_id)
            .bind(&input.image_url)
            .bind(input.variation)
            .bind(&input.prompt)
            .bind(&input.enhanced_prompt)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.tags.as_ref().map(Json))
            .fetch_one(pool)
            .await
    }

    /// List all images of a pack in insertion order, which is character
    /// order and then ascending variation.
    pub async fn list_by_pack(
        pool: &PgPool,
        pack_id: DbId,
    ) -> Result<Vec<GeneratedImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM generated_images
             WHERE pack_id = $1
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, GeneratedImage>(&query)
            .bind(pack_id)
            .fetch_all(pool)
            .await
    }
}
