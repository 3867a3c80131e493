//! Pack generation pipeline.
//!
//! - [`ports`] -- the seams to the text provider, the image provider and the
//!   pack store.
//! - [`enhancer`], [`images`], [`metadata`] -- client wrappers that turn raw
//!   provider calls into pipeline values (with fallbacks where one exists).
//! - [`orchestrator::PackGenerator`] -- drives one pack from `pending` to a
//!   terminal status.
//! - [`queue`] -- in-process handoff from the HTTP layer to the generator.

pub mod enhancer;
pub mod error;
pub mod images;
pub mod metadata;
pub mod orchestrator;
pub mod ports;
pub mod queue;
pub mod store;

pub use error::PipelineError;
pub use orchestrator::PackGenerator;
pub use queue::{GenerationJob, GenerationQueue, GenerationWorker, QueueError};
