//! Handlers for the `/character-packs` resource.
//!
//! Packs are scoped to the caller: listing returns only the caller's packs
//! and the detail of another user's pack is reported as not found.

use axum::extract::{Path, State};
use axum::Json;
use charpack_core::error::CoreError;
use charpack_core::pack::{
    validate_characters, validate_pack_name, validate_settings, PackSettings, PackStatus,
};
use charpack_core::types::DbId;
use charpack_db::models::image::GeneratedImage;
use charpack_db::models::pack::{CharacterPack, CharacterPackWithImages, CreateCharacterPack};
use charpack_db::models::user::UpsertUser;
use charpack_db::repositories::{GeneratedImageRepo, PackRepo, UserRepo};
use charpack_pipeline::GenerationJob;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::identity::CallerIdentity;
use crate::state::AppState;

/// Request body for `POST /character-packs`.
#[derive(Debug, Deserialize)]
pub struct CreatePackRequest {
    pub name: String,
    pub characters: Vec<String>,
    #[serde(default)]
    pub settings: PackSettings,
}

/// POST /api/character-packs
///
/// Stores the pack as `pending` and hands it to the generation queue. The
/// response does not wait for generation.
pub async fn create(
    State(state): State<AppState>,
    caller: CallerIdentity,
    AppJson(input): AppJson<CreatePackRequest>,
) -> AppResult<Json<CharacterPack>> {
    validate_pack_name(&input.name)?;
    validate_characters(&input.characters)?;
    validate_settings(&input.settings)?;

    UserRepo::upsert(&state.pool, &UpsertUser::bare(caller.user_id.clone())).await?;

    let pack = PackRepo::create(
        &state.pool,
        &CreateCharacterPack {
            user_id: caller.user_id,
            name: input.name.trim().to_string(),
            characters: input.characters,
            settings: input.settings,
        },
    )
    .await?;

    tracing::info!(
        pack_id = pack.id,
        characters = pack.characters.len(),
        "Character pack created",
    );

    let job = GenerationJob {
        pack_id: pack.id,
        characters: pack.characters.0.clone(),
        settings: pack.settings.0.clone(),
    };
    if let Err(e) = state.queue.enqueue(job) {
        tracing::error!(pack_id = pack.id, error = %e, "Failed to queue pack generation");
        return fail_unqueued_pack(&state, pack.id).await.map(Json);
    }

    Ok(Json(pack))
}

/// Record a pack that never reached the generator as failed, walking the
/// normal lifecycle so its status history stays valid.
async fn fail_unqueued_pack(state: &AppState, pack_id: DbId) -> AppResult<CharacterPack> {
    PackRepo::update_status(&state.pool, pack_id, PackStatus::Generating, None).await?;
    PackRepo::update_status(&state.pool, pack_id, PackStatus::Failed, None).await?;

    PackRepo::find_by_id(&state.pool, pack_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CharacterPack",
            id: pack_id,
        }))
}

/// GET /api/character-packs
pub async fn list(
    State(state): State<AppState>,
    caller: CallerIdentity,
) -> AppResult<Json<Vec<CharacterPack>>> {
    let packs = PackRepo::list_by_user(&state.pool, &caller.user_id).await?;
    Ok(Json(packs))
}

/// GET /api/character-packs/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<DbId>,
) -> AppResult<Json<CharacterPackWithImages>> {
    let pack = PackRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|p| p.user_id.as_deref() == Some(caller.user_id.as_str()))
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CharacterPack",
            id,
        }))?;

    let images: Vec<GeneratedImage> = GeneratedImageRepo::list_by_pack(&state.pool, id).await?;
    Ok(Json(CharacterPackWithImages { pack, images }))
}
