#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use charpack_core::generation::ImageRequest;
use charpack_core::pack::PackStatus;
use charpack_db::repositories::PackRepo;
use charpack_pipeline::enhancer::PromptEnhancer;
use charpack_pipeline::ports::{ImageGenerator, TextGenerator};
use charpack_pipeline::store::PgPackStore;
use charpack_pipeline::{GenerationJob, GenerationQueue, GenerationWorker, PackGenerator};
use charpack_providers::ProviderError;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

use charpack_api::config::{LogFormat, ServerConfig};
use charpack_api::router::build_app_router;
use charpack_api::state::AppState;

pub const TEST_USER: &str = "test-user";
pub const ENHANCED: &str = "heroic pose, cinematic lighting, crisp detail";

/// Build a test `ServerConfig` with safe defaults and no demo user.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        demo_user_id: None,
        generation_queue_capacity: 16,
        log_format: LogFormat::Text,
    }
}

// ---------------------------------------------------------------------------
// Provider stubs
// ---------------------------------------------------------------------------

/// Text provider: a fixed enhancement, valid metadata JSON, or failure.
pub struct StubText {
    pub fail: bool,
}

#[async_trait]
impl TextGenerator for StubText {
    async fn generate_text(&self, prompt: &str) -> Result<String, ProviderError> {
        if self.fail {
            return Err(ProviderError::NotConfigured("GEMINI_API_KEY"));
        }
        if prompt.starts_with("Generate metadata") {
            Ok(r#"{"title":"Test Title","description":"Test description.","tags":["a","b"]}"#
                .to_string())
        } else {
            Ok(ENHANCED.to_string())
        }
    }
}

/// Image provider returning as many URLs as requested, failing from the
/// given (0-based) call onwards.
pub struct StubImages {
    calls: AtomicUsize,
    fail_from_call: Option<usize>,
}

impl StubImages {
    pub fn working() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail_from_call: None,
        })
    }

    pub fn failing_from(call: usize) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail_from_call: Some(call),
        })
    }
}

#[async_trait]
impl ImageGenerator for StubImages {
    async fn generate_images(&self, request: &ImageRequest) -> Result<Value, ProviderError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_from_call.is_some_and(|from| call >= from) {
            return Err(ProviderError::Api {
                status: 500,
                body: "stub failure".to_string(),
            });
        }
        let images: Vec<Value> = (1..=request.count)
            .map(|i| json!({"url": format!("https://cdn.test/{call}/{i}.png")}))
            .collect();
        Ok(json!({ "images": images }))
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build the full application router with working stub providers and a
/// running generation worker.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app(
        pool,
        test_config(),
        Arc::new(StubText { fail: false }),
        StubImages::working(),
    )
}

/// Build the application with explicit configuration and providers.
///
/// Spawns a generation worker on the current runtime, so this must be
/// called from within a Tokio test.
pub fn build_app(
    pool: PgPool,
    config: ServerConfig,
    text: Arc<dyn TextGenerator>,
    images: Arc<dyn ImageGenerator>,
) -> Router {
    let generator = Arc::new(PackGenerator::new(
        Arc::new(PgPackStore::new(pool.clone())),
        Arc::clone(&text),
        images,
    ));
    let (queue, receiver) = GenerationQueue::channel(config.generation_queue_capacity);
    tokio::spawn(GenerationWorker::new(receiver, generator).run(CancellationToken::new()));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        enhancer: PromptEnhancer::new(text),
        queue,
    };
    build_app_router(state, &config)
}

/// Build the application with a generation queue that nothing consumes.
///
/// The receiver is returned so the caller decides whether the queue fills
/// up (keep it) or is closed (drop it).
pub fn build_app_without_worker(
    pool: PgPool,
    capacity: usize,
) -> (Router, mpsc::Receiver<GenerationJob>) {
    let config = ServerConfig {
        generation_queue_capacity: capacity,
        ..test_config()
    };
    let text: Arc<dyn TextGenerator> = Arc::new(StubText { fail: false });
    let (queue, receiver) = GenerationQueue::channel(capacity);

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        enhancer: PromptEnhancer::new(text),
        queue,
    };
    (build_app_router(state, &config), receiver)
}

/// A pool that never connects, for routes that do not touch the database.
pub fn lazy_pool() -> PgPool {
    PgPoolOptions::new()
        .connect_lazy("postgres://localhost/charpack_unused")
        .unwrap()
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    get_as(app, uri, Some(TEST_USER)).await
}

pub async fn get_as(app: Router, uri: &str, user: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(user) = user {
        builder = builder.header("x-user-id", user);
    }
    send(app, builder.body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    post_json_as(app, uri, body, Some(TEST_USER)).await
}

pub async fn post_json_as(
    app: Router,
    uri: &str,
    body: Value,
    user: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(user) = user {
        builder = builder.header("x-user-id", user);
    }
    send(app, builder.body(Body::from(body.to_string())).unwrap()).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Poll the database until the pack reaches a terminal status.
pub async fn wait_for_terminal(pool: &PgPool, pack_id: i64) -> PackStatus {
    for _ in 0..200 {
        let pack = PackRepo::find_by_id(pool, pack_id).await.unwrap().unwrap();
        if let Some(status) = pack.status().filter(|s| s.is_terminal()) {
            return status;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    panic!("pack {pack_id} did not finish generating");
}
