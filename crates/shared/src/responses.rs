//! Response envelopes for the turn endpoint.

use duskcrawl_domain::{DiceRoll, GameState};
use serde::{Deserialize, Serialize};

/// The client-visible slice of [`GameState`]. The context window never
/// leaves the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStateView {
    pub health: i32,
    pub inventory: Vec<String>,
    pub difficulty: String,
}

impl From<&GameState> for GameStateView {
    fn from(state: &GameState) -> Self {
        Self {
            health: state.health,
            inventory: state.inventory.clone(),
            difficulty: state.difficulty.clone(),
        }
    }
}

/// Successful turn: narration, the roll that shaped it, and the state view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnResponse {
    pub response: String,
    pub dice_roll: DiceRoll,
    pub game_state: GameStateView,
}

/// Every failed request answers with exactly `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_response_uses_client_field_names() {
        let state = GameState {
            inventory: vec!["torch".to_string()],
            ..GameState::default()
        };
        let response = TurnResponse {
            response: "The torch sputters.".to_string(),
            dice_roll: DiceRoll::new(64).expect("valid roll"),
            game_state: GameStateView::from(&state),
        };

        let json = serde_json::to_value(&response).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "response": "The torch sputters.",
                "diceRoll": 64,
                "gameState": {
                    "health": 100,
                    "inventory": ["torch"],
                    "difficulty": "Unforgiving"
                }
            })
        );
    }

    #[test]
    fn state_view_omits_context_window() {
        let mut state = GameState::default();
        state.record_exchange("look", "darkness");
        let json = serde_json::to_value(GameStateView::from(&state)).expect("serialize");
        assert!(json.get("contextWindow").is_none());
    }

    #[test]
    fn error_body_has_single_field() {
        let json = serde_json::to_value(ErrorResponse::new("boom")).expect("serialize");
        assert_eq!(json, serde_json::json!({"error": "boom"}));
    }
}
