//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area.
//! Use cases orchestrate across repositories and ports to fulfill user stories.

pub mod turn;

pub use turn::TurnUseCases;
