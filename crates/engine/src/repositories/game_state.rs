//! Game state storage wrapper.
//!
//! Reads never fail a turn: a missing, unreadable, or undecodable blob is
//! logged and replaced by a fresh game. Writes propagate so a turn is never
//! reported as played when its state was lost.

use std::sync::Arc;

use duskcrawl_domain::{DomainError, GameState};

use crate::infrastructure::ports::{KvStorePort, RepoError};

/// JSON read-modify-write access to per-session [`GameState`].
pub struct GameStateStore {
    kv: Arc<dyn KvStorePort>,
    context_capacity: usize,
}

impl GameStateStore {
    pub fn new(kv: Arc<dyn KvStorePort>, context_capacity: usize) -> Result<Self, DomainError> {
        // Validate once so `fresh_state` cannot fail later.
        GameState::new(context_capacity)?;
        Ok(Self {
            kv,
            context_capacity,
        })
    }

    /// Load the state for `key`, substituting a new game on any problem.
    pub async fn load(&self, key: &str) -> GameState {
        let stored = match self.kv.get(key).await {
            Ok(Some(json)) => json,
            Ok(None) => {
                tracing::debug!(session_key = %key, "No stored game state, starting new game");
                return self.fresh_state();
            }
            Err(e) => {
                tracing::warn!(session_key = %key, error = %e, "Failed to read game state, using defaults");
                return self.fresh_state();
            }
        };

        let decoded = serde_json::from_str::<GameState>(&stored)
            .map_err(RepoError::serialization)
            .and_then(|state| {
                state
                    .with_context_capacity(self.context_capacity)
                    .map_err(RepoError::serialization)
            });

        match decoded {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(session_key = %key, error = %e, "Stored game state is unreadable, using defaults");
                self.fresh_state()
            }
        }
    }

    /// Persist `state` under `key`, overwriting whatever was there.
    pub async fn save(&self, key: &str, state: &GameState) -> Result<(), RepoError> {
        let json = serde_json::to_string(state).map_err(RepoError::serialization)?;
        self.kv.put(key, json).await.map_err(|e| {
            tracing::error!(session_key = %key, error = %e, "Failed to save game state");
            e
        })
    }

    fn fresh_state(&self) -> GameState {
        GameState::new(self.context_capacity).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory_store::InMemoryKvStore;
    use crate::infrastructure::ports::MockKvStorePort;
    use duskcrawl_domain::{ContextMessage, DEFAULT_DIFFICULTY, DEFAULT_HEALTH};

    #[test]
    fn zero_capacity_is_rejected_at_construction() {
        let kv: Arc<dyn KvStorePort> = Arc::new(InMemoryKvStore::new());
        assert!(GameStateStore::new(kv, 0).is_err());
    }

    #[tokio::test]
    async fn missing_state_loads_new_game() {
        let store = GameStateStore::new(Arc::new(InMemoryKvStore::new()), 20).expect("store");

        let state = store.load("fresh").await;

        assert_eq!(state.health, DEFAULT_HEALTH);
        assert!(state.inventory.is_empty());
        assert_eq!(state.difficulty, DEFAULT_DIFFICULTY);
        assert_eq!(state.context_window.capacity(), 20);
    }

    #[tokio::test]
    async fn read_error_loads_new_game() {
        let mut kv = MockKvStorePort::new();
        kv.expect_get()
            .returning(|_| Err(RepoError::database("game_state.get", "connection reset")));

        let store = GameStateStore::new(Arc::new(kv), 10).expect("store");
        let state = store.load("abc").await;

        assert_eq!(state, GameState::new(10).expect("state"));
    }

    #[tokio::test]
    async fn corrupt_blob_loads_new_game() {
        let kv = InMemoryKvStore::new();
        kv.put("abc", "{not json".to_string()).await.expect("put");

        let store = GameStateStore::new(Arc::new(kv), 10).expect("store");
        let state = store.load("abc").await;

        assert_eq!(state.health, DEFAULT_HEALTH);
        assert!(state.context_window.is_empty());
    }

    #[tokio::test]
    async fn save_then_load_keeps_fields_and_history() {
        let store = GameStateStore::new(Arc::new(InMemoryKvStore::new()), 20).expect("store");
        let mut state = GameState {
            health: 50,
            inventory: vec!["torch".to_string()],
            ..GameState::default()
        };
        state.record_exchange("I light the torch", "The corridor flickers into view.");

        store.save("abc", &state).await.expect("save");
        let loaded = store.load("abc").await;

        assert_eq!(loaded, state);
    }

    #[tokio::test]
    async fn load_applies_configured_capacity_to_stored_history() {
        let kv = InMemoryKvStore::new();
        let mut long_state = GameState::new(20).expect("state");
        for i in 0..20 {
            long_state
                .context_window
                .push(ContextMessage::user(format!("m{i}")));
        }
        kv.put(
            "abc",
            serde_json::to_string(&long_state).expect("serialize"),
        )
        .await
        .expect("put");

        let store = GameStateStore::new(Arc::new(kv), 10).expect("store");
        let loaded = store.load("abc").await;

        assert_eq!(loaded.context_window.len(), 10);
        assert_eq!(
            loaded.history().next().map(|m| m.content.as_str()),
            Some("m10")
        );
    }

    #[tokio::test]
    async fn capacity_above_default_survives_reloads() {
        let store = GameStateStore::new(Arc::new(InMemoryKvStore::new()), 30).expect("store");

        for turn in 0..15 {
            let mut state = store.load("abc").await;
            state.record_exchange(format!("turn {turn}"), format!("narration {turn}"));
            store.save("abc", &state).await.expect("save");
        }
        let loaded = store.load("abc").await;

        assert_eq!(loaded.context_window.capacity(), 30);
        assert_eq!(loaded.context_window.len(), 30);
        assert_eq!(
            loaded.history().next().map(|m| m.content.as_str()),
            Some("turn 0")
        );
    }

    #[tokio::test]
    async fn capacity_above_default_keeps_longer_stored_history() {
        let kv = InMemoryKvStore::new();
        let mut long_state = GameState::new(25).expect("state");
        for i in 0..25 {
            long_state
                .context_window
                .push(ContextMessage::user(format!("m{i}")));
        }
        kv.put(
            "abc",
            serde_json::to_string(&long_state).expect("serialize"),
        )
        .await
        .expect("put");

        let store = GameStateStore::new(Arc::new(kv), 30).expect("store");
        let loaded = store.load("abc").await;

        assert_eq!(loaded.context_window.len(), 25);
        assert_eq!(
            loaded.history().next().map(|m| m.content.as_str()),
            Some("m0")
        );
    }

    #[tokio::test]
    async fn write_error_propagates() {
        let mut kv = MockKvStorePort::new();
        kv.expect_put()
            .returning(|_, _| Err(RepoError::database("game_state.put", "read-only")));

        let store = GameStateStore::new(Arc::new(kv), 10).expect("store");
        let result = store.save("abc", &GameState::default()).await;

        assert!(matches!(result, Err(RepoError::Database { .. })));
    }
}
