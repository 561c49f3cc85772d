//! Application state and composition.

use std::sync::Arc;

use duskcrawl_domain::DomainError;

use crate::config::SessionMode;
use crate::infrastructure::{
    clock::SystemRandom,
    ports::{KvStorePort, LlmPort, RandomPort},
};
use crate::repositories::GameStateStore;
use crate::use_cases::turn::{ProcessTurn, TurnUseCases};

/// Main application state.
///
/// Holds the use cases and request-handling policy.
/// Passed to HTTP handlers via Axum state; immutable after startup.
pub struct App {
    pub use_cases: UseCases,
    pub session_mode: SessionMode,
}

/// Container for all use cases.
pub struct UseCases {
    pub turn: TurnUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        llm: Arc<dyn LlmPort>,
        kv: Arc<dyn KvStorePort>,
        max_context_messages: usize,
        session_mode: SessionMode,
    ) -> Result<Self, DomainError> {
        Self::with_random(
            llm,
            kv,
            Arc::new(SystemRandom),
            max_context_messages,
            session_mode,
        )
    }

    /// Same as [`App::new`] with an injected random source.
    pub fn with_random(
        llm: Arc<dyn LlmPort>,
        kv: Arc<dyn KvStorePort>,
        random: Arc<dyn RandomPort>,
        max_context_messages: usize,
        session_mode: SessionMode,
    ) -> Result<Self, DomainError> {
        let states = Arc::new(GameStateStore::new(kv, max_context_messages)?);
        let process_turn = Arc::new(ProcessTurn::new(llm, states, random));

        Ok(Self {
            use_cases: UseCases {
                turn: TurnUseCases::new(process_turn),
            },
            session_mode,
        })
    }
}
