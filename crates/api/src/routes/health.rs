//! Liveness of the service and its two moving parts: the database and the
//! generation queue.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct QueueHealth {
    /// False once the generation worker has stopped.
    pub accepting: bool,
    pub free_slots: usize,
}

#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when packs can be created and generated, `degraded` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    pub generation_queue: QueueHealth,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = charpack_db::health_check(&state.pool).await.is_ok();
    let generation_queue = QueueHealth {
        accepting: !state.queue.is_closed(),
        free_slots: state.queue.free_slots(),
    };

    if !generation_queue.accepting {
        tracing::warn!("Health check: generation queue is closed");
    }

    let status = if db_healthy && generation_queue.accepting {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        generation_queue,
    })
}

/// Health routes live at the root, outside `/api`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
