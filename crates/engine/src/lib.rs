//! Duskcrawl Engine library.
//!
//! This crate contains all server-side code for the Duskcrawl turn engine.
//!
//! ## Structure
//!
//! - `repositories/` - Game state load/save over a key-value port
//! - `use_cases/` - Turn orchestration
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - HTTP entry points
//! - `config` - Environment-driven settings
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod config;
pub mod infrastructure;
pub mod repositories;
pub mod use_cases;

pub use app::App;
