//! In-process handoff from request handlers to the generator.
//!
//! Delivery is at-most-once: jobs live only in memory, so a job still queued
//! or running when the process stops is lost and its pack stays where it
//! was. There is no retry.

use std::sync::Arc;

use charpack_core::pack::PackSettings;
use charpack_core::types::DbId;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::orchestrator::PackGenerator;

/// Default bound of the job channel.
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// Everything the generator needs to run one pack.
#[derive(Debug, Clone)]
pub struct GenerationJob {
    pub pack_id: DbId,
    pub characters: Vec<String>,
    pub settings: PackSettings,
}

/// Why a job could not be handed off.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum QueueError {
    #[error("Generation queue is full")]
    Full,
    #[error("Generation worker is not running")]
    Closed,
}

/// Sending half of the job channel. Cheap to clone.
#[derive(Clone)]
pub struct GenerationQueue {
    sender: mpsc::Sender<GenerationJob>,
}

impl GenerationQueue {
    /// Create a queue and the receiver to hand to a [`GenerationWorker`].
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<GenerationJob>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, receiver)
    }

    /// Hand a job to the worker without waiting.
    pub fn enqueue(&self, job: GenerationJob) -> Result<(), QueueError> {
        self.sender.try_send(job).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => QueueError::Full,
            mpsc::error::TrySendError::Closed(_) => QueueError::Closed,
        })
    }

    /// Whether the worker side is gone and every enqueue will fail.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Jobs that can still be queued before `enqueue` reports `Full`.
    pub fn free_slots(&self) -> usize {
        self.sender.capacity()
    }
}

/// Receives jobs and runs each one on its own task, so packs from different
/// requests proceed concurrently.
pub struct GenerationWorker {
    receiver: mpsc::Receiver<GenerationJob>,
    generator: Arc<PackGenerator>,
    tasks: TaskTracker,
}

impl GenerationWorker {
    pub fn new(receiver: mpsc::Receiver<GenerationJob>, generator: Arc<PackGenerator>) -> Self {
        Self {
            receiver,
            generator,
            tasks: TaskTracker::new(),
        }
    }

    /// Run until cancelled or until every [`GenerationQueue`] is dropped,
    /// then wait for in-flight packs to finish.
    pub async fn run(mut self, cancel: CancellationToken) {
        tracing::info!("Generation worker started");

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Generation worker shutting down");
                    break;
                }
                job = self.receiver.recv() => {
                    let Some(job) = job else {
                        tracing::info!("Generation queue closed");
                        break;
                    };
                    self.spawn(job);
                }
            }
        }

        self.receiver.close();
        let dropped = std::iter::from_fn(|| self.receiver.try_recv().ok()).count();
        if dropped > 0 {
            tracing::warn!(dropped, "Discarding queued generation jobs");
        }

        self.tasks.close();
        self.tasks.wait().await;
        tracing::info!("Generation worker stopped");
    }

    fn spawn(&self, job: GenerationJob) {
        let generator = Arc::clone(&self.generator);
        tracing::debug!(pack_id = job.pack_id, characters = job.characters.len(), "Starting pack job");
        self.tasks.spawn(async move {
            generator
                .generate(job.pack_id, &job.characters, &job.settings)
                .await;
        });
    }
}
