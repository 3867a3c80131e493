//! In-memory fakes for the pipeline seams.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use charpack_core::generation::ImageRequest;
use charpack_core::pack::PackStatus;
use charpack_core::types::{DbId, Timestamp};
use charpack_db::models::image::CreateGeneratedImage;
use charpack_pipeline::ports::{ImageGenerator, PackStore, TextGenerator};
use charpack_pipeline::{PackGenerator, PipelineError};
use charpack_providers::ProviderError;
use serde_json::{json, Value};

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Pack store that enforces the lifecycle like the database does and records
/// every applied transition.
#[derive(Default)]
pub struct MemoryStore {
    statuses: Mutex<HashMap<DbId, PackStatus>>,
    history: Mutex<Vec<(DbId, PackStatus)>>,
    completed_at: Mutex<HashMap<DbId, Timestamp>>,
    images: Mutex<Vec<CreateGeneratedImage>>,
    /// Fail the insert with this (0-based) index.
    fail_insert_at: Mutex<Option<usize>>,
    /// Fail every write of this status.
    fail_status: Mutex<Option<PackStatus>>,
}

impl MemoryStore {
    pub fn with_pending(pack_ids: &[DbId]) -> Arc<Self> {
        let store = Self::default();
        {
            let mut statuses = store.statuses.lock().unwrap();
            let mut history = store.history.lock().unwrap();
            for id in pack_ids {
                statuses.insert(*id, PackStatus::Pending);
                history.push((*id, PackStatus::Pending));
            }
        }
        Arc::new(store)
    }

    pub fn fail_insert_at(&self, index: usize) {
        *self.fail_insert_at.lock().unwrap() = Some(index);
    }

    pub fn fail_status_write(&self, status: PackStatus) {
        *self.fail_status.lock().unwrap() = Some(status);
    }

    pub fn status(&self, pack_id: DbId) -> Option<PackStatus> {
        self.statuses.lock().unwrap().get(&pack_id).copied()
    }

    pub fn history(&self, pack_id: DbId) -> Vec<PackStatus> {
        self.history
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _)| *id == pack_id)
            .map(|(_, s)| *s)
            .collect()
    }

    pub fn completed_at(&self, pack_id: DbId) -> Option<Timestamp> {
        self.completed_at.lock().unwrap().get(&pack_id).copied()
    }

    pub fn images(&self) -> Vec<CreateGeneratedImage> {
        self.images.lock().unwrap().clone()
    }

    pub fn images_for(&self, character_id: &str) -> Vec<CreateGeneratedImage> {
        self.images()
            .into_iter()
            .filter(|i| i.character_id == character_id)
            .collect()
    }
}

#[async_trait]
impl PackStore for MemoryStore {
    async fn update_pack_status(
        &self,
        pack_id: DbId,
        status: PackStatus,
        completed_at: Option<Timestamp>,
    ) -> Result<bool, PipelineError> {
        if *self.fail_status.lock().unwrap() == Some(status) {
            return Err(PipelineError::Store("connection reset".to_string()));
        }
        let mut statuses = self.statuses.lock().unwrap();
        let Some(current) = statuses.get(&pack_id).copied() else {
            return Ok(false);
        };
        if !current.can_transition_to(status) {
            return Ok(false);
        }
        statuses.insert(pack_id, status);
        self.history.lock().unwrap().push((pack_id, status));
        if status == PackStatus::Completed {
            if let Some(at) = completed_at {
                self.completed_at.lock().unwrap().insert(pack_id, at);
            }
        }
        Ok(true)
    }

    async fn insert_generated_image(
        &self,
        image: &CreateGeneratedImage,
    ) -> Result<DbId, PipelineError> {
        let mut images = self.images.lock().unwrap();
        if *self.fail_insert_at.lock().unwrap() == Some(images.len()) {
            return Err(PipelineError::Store("disk full".to_string()));
        }
        images.push(image.clone());
        Ok(images.len() as DbId)
    }
}

// ---------------------------------------------------------------------------
// Text provider
// ---------------------------------------------------------------------------

/// Text provider that answers enhancement and metadata instructions
/// differently, or fails every call.
pub struct FakeText {
    enhancement: Option<String>,
    metadata: Option<String>,
}

impl FakeText {
    pub fn replying(enhancement: &str, metadata: &str) -> Arc<Self> {
        Arc::new(Self {
            enhancement: Some(enhancement.to_string()),
            metadata: Some(metadata.to_string()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            enhancement: None,
            metadata: None,
        })
    }
}

#[async_trait]
impl TextGenerator for FakeText {
    async fn generate_text(&self, prompt: &str) -> Result<String, ProviderError> {
        let reply = if prompt.starts_with("Generate metadata") {
            &self.metadata
        } else {
            &self.enhancement
        };
        reply.clone().ok_or(ProviderError::Api {
            status: 503,
            body: "text model unavailable".to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Image provider
// ---------------------------------------------------------------------------

/// Image provider that answers each call from a script, in order. Calls past
/// the end of the script fail.
pub struct ScriptedImages {
    script: Mutex<VecDeque<Result<Value, ProviderError>>>,
    requests: Mutex<Vec<ImageRequest>>,
}

impl ScriptedImages {
    pub fn new(script: Vec<Result<Value, ProviderError>>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<ImageRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageGenerator for ScriptedImages {
    async fn generate_images(&self, request: &ImageRequest) -> Result<Value, ProviderError> {
        self.requests.lock().unwrap().push(request.clone());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(provider_down()))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub fn provider_down() -> ProviderError {
    ProviderError::Api {
        status: 502,
        body: "image model unavailable".to_string(),
    }
}

/// A direct-shape response with `n` URLs under `prefix`.
pub fn image_response(prefix: &str, n: usize) -> Value {
    let images: Vec<Value> = (1..=n)
        .map(|i| json!({"url": format!("https://cdn.test/{prefix}/{i}.png")}))
        .collect();
    json!({ "images": images })
}

pub const METADATA_JSON: &str =
    r#"{"title":"Hero Shot","description":"A bold pose.","tags":["hero","bold"]}"#;

pub fn generator(
    store: Arc<MemoryStore>,
    text: Arc<FakeText>,
    images: Arc<ScriptedImages>,
) -> PackGenerator {
    PackGenerator::new(store, text, images)
}

pub fn ids(characters: &[&str]) -> Vec<String> {
    characters.iter().map(|c| c.to_string()).collect()
}
