use axum::routing::post;
use axum::Router;

use crate::handlers::prompt;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/enhance-prompt", post(prompt::enhance))
}
