//! Duskcrawl Shared - wire contract for the turn endpoint
//!
//! Request parsing, response envelopes, and the header and route names the
//! browser client relies on.
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde, serde_json, and thiserror
//! 2. **No business logic** - Pure data types and serialization
//! 3. **camelCase on the wire** - field names match what the client reads

pub mod requests;
pub mod responses;

pub use requests::{RequestError, TurnRequest};
pub use responses::{ErrorResponse, GameStateView, TurnResponse};

/// Header carrying the per-browser session identifier.
pub const SESSION_HEADER: &str = "Session-ID";

/// Storage key used when a request carries no session and sessions are optional.
pub const FIXED_SESSION_KEY: &str = "gameState";

/// Route paths served by the engine.
pub mod routes {
    pub const TURN: &str = "/game/turn";
    pub const API_TURN: &str = "/api/game/turn";
    pub const TEST: &str = "/test";
    pub const HEALTH: &str = "/api/health";
}
