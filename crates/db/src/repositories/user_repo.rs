//! Repository for the `users` table.

use sqlx::PgPool;

use crate::models::user::{UpsertUser, User};

const COLUMNS: &str =
    "id, email, first_name, last_name, profile_image_url, created_at, updated_at";

/// Provides lookup and upsert for users.
pub struct UserRepo;

impl UserRepo {
    /// Find a user by identifier.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a user, or refresh the profile of an existing one.
    ///
    /// Profile fields that are `None` in `input` keep their stored value, so
    /// a bare identity upsert never erases a profile.
    pub async fn upsert(pool: &PgPool, input: &UpsertUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (id, email, first_name, last_name, profile_image_url)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (id) DO UPDATE SET
                email = COALESCE(EXCLUDED.email, users.email),
                first_name = COALESCE(EXCLUDED.first_name, users.first_name),
                last_name = COALESCE(EXCLUDED.last_name, users.last_name),
                profile_image_url = COALESCE(EXCLUDED.profile_image_url, users.profile_image_url),
                updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.id)
            .bind(&input.email)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.profile_image_url)
            .fetch_one(pool)
            .await
    }
}
