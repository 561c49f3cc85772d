//! Per-session game state.
//!
//! Health, inventory and difficulty are set once at creation and passed
//! through every turn untouched; only the narrator describes changes to them.
//! The context window is the one field a turn mutates.

use serde::{Deserialize, Serialize};

use crate::value_objects::{ContextWindow, ContextMessage};
use crate::DomainError;

/// Starting health for a new adventurer.
pub const DEFAULT_HEALTH: i32 = 100;

/// Difficulty label for every new game.
pub const DEFAULT_DIFFICULTY: &str = "Unforgiving";

/// The persisted state of one playthrough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub health: i32,
    pub inventory: Vec<String>,
    pub difficulty: String,
    #[serde(default)]
    pub context_window: ContextWindow,
}

impl GameState {
    /// Fresh state with a context window bounded to `capacity` messages.
    pub fn new(capacity: usize) -> Result<Self, DomainError> {
        Ok(Self {
            context_window: ContextWindow::with_capacity(capacity)?,
            ..Self::default()
        })
    }

    /// Reapply the configured window bound, typically right after loading.
    pub fn with_context_capacity(mut self, capacity: usize) -> Result<Self, DomainError> {
        self.context_window.set_capacity(capacity)?;
        Ok(self)
    }

    /// Record a completed turn in the rolling history.
    pub fn record_exchange(&mut self, player_input: impl Into<String>, narration: impl Into<String>) {
        self.context_window.push_exchange(player_input, narration);
    }

    pub fn history(&self) -> impl Iterator<Item = &ContextMessage> {
        self.context_window.iter()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            health: DEFAULT_HEALTH,
            inventory: Vec::new(),
            difficulty: DEFAULT_DIFFICULTY.to_string(),
            context_window: ContextWindow::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::MessageRole;

    #[test]
    fn default_state_matches_new_game() {
        let state = GameState::default();
        assert_eq!(state.health, 100);
        assert!(state.inventory.is_empty());
        assert_eq!(state.difficulty, "Unforgiving");
        assert!(state.context_window.is_empty());
    }

    #[test]
    fn new_uses_requested_capacity() {
        let state = GameState::new(10).expect("capacity");
        assert_eq!(state.context_window.capacity(), 10);
        assert!(GameState::new(0).is_err());
    }

    #[test]
    fn record_exchange_leaves_other_fields_alone() {
        let mut state = GameState {
            health: 50,
            inventory: vec!["torch".to_string()],
            ..GameState::default()
        };
        state.record_exchange("I light the torch", "Shadows retreat.");

        assert_eq!(state.health, 50);
        assert_eq!(state.inventory, vec!["torch".to_string()]);
        assert_eq!(state.difficulty, DEFAULT_DIFFICULTY);
        let roles: Vec<MessageRole> = state.history().map(|m| m.role).collect();
        assert_eq!(roles, vec![MessageRole::User, MessageRole::Assistant]);
    }

    #[test]
    fn round_trips_stored_blob_layout() {
        let blob = r#"{
            "health": 50,
            "inventory": ["torch"],
            "difficulty": "Unforgiving",
            "contextWindow": [{"role": "user", "content": "hello"}]
        }"#;
        let state: GameState = serde_json::from_str(blob).expect("deserialize");
        assert_eq!(state.health, 50);
        assert_eq!(state.context_window.len(), 1);

        let json = serde_json::to_value(&state).expect("serialize");
        assert!(json.get("contextWindow").is_some());
        assert!(json.get("context_window").is_none());
    }

    #[test]
    fn missing_context_window_defaults_to_empty() {
        let state: GameState =
            serde_json::from_str(r#"{"health":7,"inventory":[],"difficulty":"Unforgiving"}"#)
                .expect("deserialize");
        assert!(state.context_window.is_empty());
    }
}
