//! Turn processing errors.

use duskcrawl_domain::DomainError;

use crate::infrastructure::ports::{LlmError, RepoError};

/// Errors that can fail a turn after the request was accepted.
#[derive(Debug, thiserror::Error)]
pub enum TurnError {
    #[error("AI call failed: {0}")]
    Generation(#[from] LlmError),
    #[error("Failed to save game state: {0}")]
    Persistence(#[from] RepoError),
    #[error("Dice roll failed: {0}")]
    Dice(#[from] DomainError),
}
