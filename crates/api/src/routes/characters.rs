use axum::routing::get;
use axum::Router;

use crate::handlers::character;
use crate::state::AppState;

/// Routes mounted at `/characters`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(character::list))
}
