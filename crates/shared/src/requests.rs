//! Inbound request bodies.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why an inbound turn request was rejected before any game logic ran.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("Invalid input: playerInput must be a string")]
    InvalidPlayerInput,
    #[error("Session-ID header is missing")]
    MissingSession,
}

/// Body of `POST /game/turn`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnRequest {
    pub player_input: String,
}

impl TurnRequest {
    /// Parse a raw body, requiring `playerInput` to be a JSON string.
    ///
    /// Unparseable bodies, numbers, `null`, arrays and a missing field are
    /// all rejected with [`RequestError::InvalidPlayerInput`] so the caller
    /// can answer 400 without touching game state.
    pub fn from_slice(body: &[u8]) -> Result<Self, RequestError> {
        let value: serde_json::Value =
            serde_json::from_slice(body).map_err(|_| RequestError::InvalidPlayerInput)?;

        match value.get("playerInput") {
            Some(serde_json::Value::String(input)) => Ok(Self {
                player_input: input.clone(),
            }),
            _ => Err(RequestError::InvalidPlayerInput),
        }
    }
}
