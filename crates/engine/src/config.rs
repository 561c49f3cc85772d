//! Engine configuration loaded from environment variables.
//!
//! Every setting has a default so a bare `cargo run` serves a playable game
//! against a local Ollama. Unparseable values fall back to the default with
//! a warning; only a Workers AI provider without credentials is fatal.

use std::path::PathBuf;

use duskcrawl_domain::ContextWindow;

use crate::infrastructure::ollama::{DEFAULT_OLLAMA_BASE_URL, DEFAULT_OLLAMA_MODEL};
use crate::infrastructure::workers_ai::{DEFAULT_WORKERS_AI_BASE_URL, DEFAULT_WORKERS_AI_MODEL};

const DEFAULT_SERVER_HOST: &str = "0.0.0.0";
const DEFAULT_SERVER_PORT: u16 = 3000;
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 120;
const DEFAULT_STATE_DB: &str = "game_state.db";
const DEFAULT_STATIC_DIR: &str = "public";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set when LLM_PROVIDER=workers-ai")]
    MissingVar(&'static str),
}

/// Which text-generation backend to call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmProvider {
    Ollama {
        base_url: String,
        model: String,
    },
    WorkersAi {
        base_url: String,
        account_id: String,
        api_token: String,
        model: String,
    },
}

/// Where game state blobs live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Sqlite { path: String },
    Memory,
}

/// Whether the `Session-ID` header is mandatory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// Reject requests without a session header.
    Required,
    /// Fall back to one shared game when the header is absent.
    Optional,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub server_host: String,
    pub server_port: u16,
    pub llm: LlmProvider,
    pub llm_timeout_secs: u64,
    pub store: StoreBackend,
    pub max_context_messages: usize,
    pub session_mode: SessionMode,
    pub static_dir: PathBuf,
    pub cors_allowed_origins: Option<String>,
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source (the process env in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let server_host = var("SERVER_HOST").unwrap_or_else(|| DEFAULT_SERVER_HOST.into());
        let server_port = parse_or(
            "SERVER_PORT",
            var("SERVER_PORT").or_else(|| var("PORT")),
            DEFAULT_SERVER_PORT,
        );
        let llm_timeout_secs = parse_or(
            "LLM_TIMEOUT_SECS",
            var("LLM_TIMEOUT_SECS"),
            DEFAULT_LLM_TIMEOUT_SECS,
        );

        let llm = match var("LLM_PROVIDER").as_deref().map(str::to_ascii_lowercase).as_deref() {
            Some("workers-ai") | Some("workers_ai") | Some("cloudflare") => LlmProvider::WorkersAi {
                base_url: var("WORKERS_AI_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_WORKERS_AI_BASE_URL.into()),
                account_id: var("WORKERS_AI_ACCOUNT_ID")
                    .ok_or(ConfigError::MissingVar("WORKERS_AI_ACCOUNT_ID"))?,
                api_token: var("WORKERS_AI_API_TOKEN")
                    .ok_or(ConfigError::MissingVar("WORKERS_AI_API_TOKEN"))?,
                model: var("WORKERS_AI_MODEL").unwrap_or_else(|| DEFAULT_WORKERS_AI_MODEL.into()),
            },
            other => {
                if let Some(other) = other.filter(|p| *p != "ollama") {
                    tracing::warn!(provider = %other, "Unknown LLM_PROVIDER, using ollama");
                }
                LlmProvider::Ollama {
                    base_url: var("OLLAMA_BASE_URL")
                        .or_else(|| var("OLLAMA_URL"))
                        .unwrap_or_else(|| DEFAULT_OLLAMA_BASE_URL.into()),
                    model: var("OLLAMA_MODEL").unwrap_or_else(|| DEFAULT_OLLAMA_MODEL.into()),
                }
            }
        };

        let store = match var("STATE_STORE").as_deref() {
            Some("memory") => StoreBackend::Memory,
            other => {
                if let Some(other) = other.filter(|s| *s != "sqlite") {
                    tracing::warn!(store = %other, "Unknown STATE_STORE, using sqlite");
                }
                StoreBackend::Sqlite {
                    path: var("STATE_DB").unwrap_or_else(|| DEFAULT_STATE_DB.into()),
                }
            }
        };

        let mut max_context_messages = parse_or(
            "MAX_CONTEXT_MESSAGES",
            var("MAX_CONTEXT_MESSAGES"),
            ContextWindow::DEFAULT_CAPACITY,
        );
        if max_context_messages == 0 {
            tracing::warn!("MAX_CONTEXT_MESSAGES must be at least 1, using default");
            max_context_messages = ContextWindow::DEFAULT_CAPACITY;
        }

        let session_mode = match var("SESSION_MODE").as_deref() {
            Some("optional") => SessionMode::Optional,
            Some("required") | None => SessionMode::Required,
            Some(other) => {
                tracing::warn!(mode = %other, "Unknown SESSION_MODE, requiring sessions");
                SessionMode::Required
            }
        };

        Ok(Self {
            server_host,
            server_port,
            llm,
            llm_timeout_secs,
            store,
            max_context_messages,
            session_mode,
            static_dir: PathBuf::from(var("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.into())),
            cors_allowed_origins: var("CORS_ALLOWED_ORIGINS"),
        })
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(key = %key, value = %raw, "Invalid value, using default");
            default
        }),
        None => default,
    }
}
