use axum::routing::get;
use axum::Router;

use crate::handlers::pack;
use crate::state::AppState;

/// Routes mounted at `/character-packs`.
///
/// ```text
/// GET    /          -> list
/// POST   /          -> create
/// GET    /{id}      -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pack::list).post(pack::create))
        .route("/{id}", get(pack::get_by_id))
}
