use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use charpack_core::pack::PackStatus;
use charpack_db::models::user::UpsertUser;
use charpack_db::repositories::{PackRepo, UserRepo};
use charpack_pipeline::enhancer::PromptEnhancer;
use charpack_pipeline::ports::{ImageGenerator, TextGenerator};
use charpack_pipeline::store::PgPackStore;
use charpack_pipeline::{GenerationQueue, GenerationWorker, PackGenerator};
use charpack_providers::gemini::{GeminiClient, GeminiConfig};
use charpack_providers::runware::{RunwareClient, RunwareConfig};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use charpack_api::config::{LogFormat, ServerConfig};
use charpack_api::router::build_app_router;
use charpack_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = ServerConfig::from_env();

    // --- Tracing ---
    let json_logs = config.log_format == LogFormat::Json;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "charpack_api=debug,charpack_pipeline=debug,tower_http=debug".into()
            }),
        )
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json_logs).then(|| tracing_subscriber::fmt::layer()))
        .init();

    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = charpack_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    charpack_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    charpack_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Demo user ---
    if let Some(demo_user_id) = &config.demo_user_id {
        UserRepo::upsert(&pool, &UpsertUser::bare(demo_user_id.clone()))
            .await
            .expect("Failed to create demo user");
        tracing::info!(user_id = %demo_user_id, "Demo user ready");
    }

    report_stuck_packs(&pool).await;

    // --- Providers ---
    let gemini_config = GeminiConfig::from_env();
    if gemini_config.api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY not set, prompts and metadata will use fallbacks");
    }
    let runware_config = RunwareConfig::from_env();
    if runware_config.api_key.is_none() {
        tracing::warn!("RUNWARE_API_KEY not set, pack generation will fail");
    }

    let text: Arc<dyn TextGenerator> =
        Arc::new(GeminiClient::new(gemini_config).expect("Failed to build Gemini client"));
    let images: Arc<dyn ImageGenerator> =
        Arc::new(RunwareClient::new(runware_config).expect("Failed to build Runware client"));

    // --- Generation worker ---
    let generator = Arc::new(PackGenerator::new(
        Arc::new(PgPackStore::new(pool.clone())),
        Arc::clone(&text),
        images,
    ));
    let (queue, receiver) = GenerationQueue::channel(config.generation_queue_capacity);
    let worker_cancel = CancellationToken::new();
    let worker = GenerationWorker::new(receiver, generator);
    let worker_handle = tokio::spawn(worker.run(worker_cancel.clone()));
    tracing::info!(capacity = config.generation_queue_capacity, "Generation worker spawned");

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        enhancer: PromptEnhancer::new(text),
        queue,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    worker_cancel.cancel();
    let drain = Duration::from_secs(config.shutdown_timeout_secs);
    if tokio::time::timeout(drain, worker_handle).await.is_err() {
        tracing::warn!(
            timeout_secs = config.shutdown_timeout_secs,
            "Packs still generating at shutdown will remain in 'generating'",
        );
    }

    tracing::info!("Graceful shutdown complete");
}

/// Log packs left in `generating` by a previous process. They are not
/// resumed.
async fn report_stuck_packs(pool: &charpack_db::DbPool) {
    match PackRepo::list_by_status(pool, PackStatus::Generating).await {
        Ok(packs) if packs.is_empty() => {}
        Ok(packs) => {
            let ids: Vec<_> = packs.iter().map(|p| p.id).collect();
            tracing::warn!(
                count = ids.len(),
                pack_ids = ?ids,
                "Packs stuck in 'generating' from a previous run",
            );
        }
        Err(e) => tracing::error!(error = %e, "Failed to check for stuck packs"),
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
