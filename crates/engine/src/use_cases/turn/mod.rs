//! Turn use cases.
//!
//! A turn is one player input answered by one narration.

use std::sync::Arc;

mod error;
mod process_turn;
mod prompt;

pub use error::TurnError;
pub use process_turn::{ProcessTurn, TurnOutcome};
pub use prompt::build_system_prompt;

/// Container for turn use cases.
pub struct TurnUseCases {
    pub process: Arc<ProcessTurn>,
}

impl TurnUseCases {
    pub fn new(process: Arc<ProcessTurn>) -> Self {
        Self { process }
    }
}
