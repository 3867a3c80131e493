//! Repository for the `character_packs` table.

use charpack_core::pack::PackStatus;
use charpack_core::types::{DbId, Timestamp};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::pack::{CharacterPack, CreateCharacterPack};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, user_id, name, characters, settings, status, created_at, completed_at";

/// Provides create/read/status-update operations for character packs.
pub struct PackRepo;

impl PackRepo {
    /// Insert a new pack in `pending` status, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateCharacterPack,
    ) -> Result<CharacterPack, sqlx::Error> {
        let query = format!(
            "INSERT INTO character_packs (user_id, name, characters, settings, status)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CharacterPack>(&query)
            .bind(&input.user_id)
            .bind(&input.name)
            .bind(Json(&input.characters))
            .bind(Json(&input.settings))
            .bind(PackStatus::Pending.as_str())
            .fetch_one(pool)
            .await
    }

    /// Find a pack by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<CharacterPack>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM character_packs WHERE id = $1");
        sqlx::query_as::<_, CharacterPack>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's packs, newest first.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: &str,
    ) -> Result<Vec<CharacterPack>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM character_packs
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, CharacterPack>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// List all packs currently in `status`, oldest first.
    pub async fn list_by_status(
        pool: &PgPool,
        status: PackStatus,
    ) -> Result<Vec<CharacterPack>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM character_packs
             WHERE status = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, CharacterPack>(&query)
            .bind(status.as_str())
            .fetch_all(pool)
            .await
    }

    /// Move a pack to `status` if its current status is a legal predecessor.
    ///
    /// `completed_at` is written only when entering `completed`; for any
    /// other target the stored value is left alone. Returns `false` when no
    /// row was updated (unknown id, or the transition is not allowed).
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: PackStatus,
        completed_at: Option<Timestamp>,
    ) -> Result<bool, sqlx::Error> {
        let predecessors: Vec<String> = status
            .predecessors()
            .into_iter()
            .map(|s| s.as_str().to_string())
            .collect();
        let completed_at = if status == PackStatus::Completed {
            completed_at
        } else {
            None
        };

        let result = sqlx::query(
            "UPDATE character_packs SET
                status = $2,
                completed_at = COALESCE($3, completed_at)
             WHERE id = $1 AND status = ANY($4)",
        )
        .bind(id)
        .bind(status.as_str())
        .bind(completed_at)
        .bind(predecessors)
        .execute(pool)
        .await?;

        let applied = result.rows_affected() > 0;
        if !applied {
            tracing::debug!(pack_id = id, status = %status, "Pack status transition not applied");
        }
        Ok(applied)
    }
}
