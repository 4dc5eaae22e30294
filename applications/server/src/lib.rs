//! Grunge Server Library
//!
//! HTTP API for the music catalog (artists, albums, tracks) and playlist
//! management.
//!
//! This library exposes the router and its components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod state;

// Re-export commonly used types for convenience
pub use api::create_router;
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use state::AppState;
