//! Entities - state with a lifecycle, persisted between turns

mod game_state;

pub use game_state::{GameState, DEFAULT_DIFFICULTY, DEFAULT_HEALTH};
