use charpack_providers::ProviderError;

/// Errors that abort a pack.
///
/// Enhancement and metadata failures never surface here; they are absorbed
/// by their wrappers.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The image provider call failed.
    #[error("Image generation failed: {0}")]
    Provider(#[from] ProviderError),

    /// A database write failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A non-database store failed.
    #[error("Store error: {0}")]
    Store(String),
}
