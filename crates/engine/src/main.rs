//! Duskcrawl Engine - Main entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::header::HeaderName;
use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use duskcrawl_engine::{
    api,
    config::{EngineConfig, LlmProvider, StoreBackend},
    infrastructure::{
        clock::SystemClock,
        memory_store::InMemoryKvStore,
        ollama::OllamaClient,
        ports::{ClockPort, KvStorePort, LlmPort},
        sqlite_store::SqliteKvStore,
        workers_ai::WorkersAiClient,
    },
    App,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the engine may be started from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "duskcrawl_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Duskcrawl Engine");

    let config = EngineConfig::from_env()?;

    let llm: Arc<dyn LlmPort> = match &config.llm {
        LlmProvider::Ollama { base_url, model } => {
            tracing::info!(base_url = %base_url, model = %model, "Using Ollama-compatible LLM");
            Arc::new(OllamaClient::with_timeout(
                base_url,
                model,
                config.llm_timeout_secs,
            ))
        }
        LlmProvider::WorkersAi {
            base_url,
            account_id,
            api_token,
            model,
        } => {
            tracing::info!(model = %model, "Using Workers AI LLM");
            Arc::new(WorkersAiClient::new(
                base_url,
                account_id,
                api_token,
                model,
                config.llm_timeout_secs,
            ))
        }
    };

    let kv: Arc<dyn KvStorePort> = match &config.store {
        StoreBackend::Sqlite { path } => {
            tracing::info!(path = %path, "Opening game state database");
            let clock: Arc<dyn ClockPort> = Arc::new(SystemClock);
            Arc::new(SqliteKvStore::new(path, clock).await?)
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory game state; progress is lost on restart");
            Arc::new(InMemoryKvStore::new())
        }
    };

    let app = Arc::new(App::new(
        llm,
        kv,
        config.max_context_messages,
        config.session_mode,
    )?);
    tracing::info!(
        max_context_messages = config.max_context_messages,
        session_mode = ?config.session_mode,
        "Turn engine configured"
    );

    let mut router = api::http::routes().with_state(app);

    if config.static_dir.is_dir() {
        tracing::info!(path = %config.static_dir.display(), "Serving static client");
        router = router.fallback_service(ServeDir::new(&config.static_dir));
    } else {
        tracing::warn!(
            path = %config.static_dir.display(),
            "Static directory not found, browser client disabled"
        );
    }

    router = router.layer(TraceLayer::new_for_http());

    if let Some(cors) = config
        .cors_allowed_origins
        .as_deref()
        .and_then(build_cors_layer)
    {
        router = router.layer(cors);
    }

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server_host, config.server_port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

fn build_cors_layer(allowed_origins: &str) -> Option<CorsLayer> {
    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        // The browser client sends Session-ID and JSON content types, both of which preflight.
        .allow_headers([
            HeaderName::from_static("session-id"),
            axum::http::header::CONTENT_TYPE,
        ]);

    if allowed_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        if origins.is_empty() {
            return None;
        }

        cors = cors.allow_origin(origins);
    }

    Some(cors)
}
