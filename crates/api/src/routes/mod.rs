pub mod characters;
pub mod health;
pub mod packs;
pub mod prompts;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /character-packs                 list, create
/// /character-packs/{id}            detail with images
///
/// /characters                      catalog (optional ?category=)
///
/// /enhance-prompt                  standalone prompt enhancement (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/character-packs", packs::router())
        .nest("/characters", characters::router())
        .merge(prompts::router())
}
