//! Value objects - Immutable objects defined by their attributes

mod context_window;
mod dice;

pub use context_window::{ContextMessage, ContextWindow, MessageRole};
pub use dice::DiceRoll;
