//! Duskcrawl domain types.
//!
//! Pure data and invariants for a single-turn text adventure: the persisted
//! [`GameState`], its bounded [`ContextWindow`], and the per-turn [`DiceRoll`].
//! Nothing in this crate performs I/O.

pub mod entities;
pub mod error;
pub mod value_objects;

pub use entities::{GameState, DEFAULT_DIFFICULTY, DEFAULT_HEALTH};
pub use error::DomainError;
pub use value_objects::{ContextMessage, ContextWindow, DiceRoll, MessageRole};
