//! Rolling conversation history handed to the narrator each turn.
//!
//! The window is a bounded FIFO: pushing past capacity evicts the oldest
//! message, so the surviving messages are always the most recent suffix.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::DomainError;

/// Who authored a message in the conversation history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
    /// Fallback for roles written by other tools or older state blobs
    #[serde(other)]
    Unknown,
}

/// A single `{role, content}` record in the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ContextMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Bounded, oldest-evicted-first message history.
///
/// Persists as a plain JSON array; the capacity is runtime configuration and
/// is reapplied after loading with [`ContextWindow::set_capacity`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ContextMessage>", into = "Vec<ContextMessage>")]
pub struct ContextWindow {
    messages: VecDeque<ContextMessage>,
    capacity: usize,
}

impl ContextWindow {
    /// Capacity used when nothing else is configured.
    pub const DEFAULT_CAPACITY: usize = 20;

    pub fn with_capacity(capacity: usize) -> Result<Self, DomainError> {
        validate_capacity(capacity)?;
        Ok(Self {
            messages: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContextMessage> {
        self.messages.iter()
    }

    /// Change the bound, dropping the oldest messages if the window is now
    /// over capacity.
    pub fn set_capacity(&mut self, capacity: usize) -> Result<(), DomainError> {
        validate_capacity(capacity)?;
        self.capacity = capacity;
        self.evict_overflow();
        Ok(())
    }

    /// Append a message, evicting from the front once full.
    pub fn push(&mut self, message: ContextMessage) {
        self.messages.push_back(message);
        self.evict_overflow();
    }

    /// Append one completed turn: the player's input then the narration.
    pub fn push_exchange(&mut self, player_input: impl Into<String>, narration: impl Into<String>) {
        self.push(ContextMessage::user(player_input));
        self.push(ContextMessage::assistant(narration));
    }

    fn evict_overflow(&mut self) {
        while self.messages.len() > self.capacity {
            self.messages.pop_front();
        }
    }
}

fn validate_capacity(capacity: usize) -> Result<(), DomainError> {
    if capacity == 0 {
        return Err(DomainError::validation(
            "context window capacity must be at least 1",
        ));
    }
    Ok(())
}

impl Default for ContextWindow {
    fn default() -> Self {
        Self {
            messages: VecDeque::new(),
            capacity: Self::DEFAULT_CAPACITY,
        }
    }
}

/// A decoded array keeps every message; the bound is only known once the
/// caller applies it with [`ContextWindow::set_capacity`].
impl From<Vec<ContextMessage>> for ContextWindow {
    fn from(messages: Vec<ContextMessage>) -> Self {
        Self {
            capacity: messages.len().max(Self::DEFAULT_CAPACITY),
            messages: messages.into(),
        }
    }
}

impl From<ContextWindow> for Vec<ContextMessage> {
    fn from(window: ContextWindow) -> Self {
        window.messages.into()
    }
}
