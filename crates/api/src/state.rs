use std::sync::Arc;

use charpack_pipeline::enhancer::PromptEnhancer;
use charpack_pipeline::GenerationQueue;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: charpack_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Prompt enhancement for the standalone enhance endpoint.
    pub enhancer: PromptEnhancer,
    /// Handoff to the background pack generator.
    pub queue: GenerationQueue,
}
