use async_trait::async_trait;
use charpack_core::pack::PackStatus;
use charpack_core::types::{DbId, Timestamp};
use charpack_db::models::image::CreateGeneratedImage;
use charpack_db::repositories::{GeneratedImageRepo, PackRepo};
use charpack_db::DbPool;

use crate::ports::PackStore;
use crate::PipelineError;

/// [`PackStore`] backed by the PostgreSQL repositories.
#[derive(Clone)]
pub struct PgPackStore {
    pool: DbPool,
}

impl PgPackStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PackStore for PgPackStore {
    async fn update_pack_status(
        &self,
        pack_id: DbId,
        status: PackStatus,
        completed_at: Option<Timestamp>,
    ) -> Result<bool, PipelineError> {
        Ok(PackRepo::update_status(&self.pool, pack_id, status, completed_at).await?)
    }

    async fn insert_generated_image(
        &self,
        image: &CreateGeneratedImage,
    ) -> Result<DbId, PipelineError> {
        let row = GeneratedImageRepo::create(&self.pool, image).await?;
        Ok(row.id)
    }
}
