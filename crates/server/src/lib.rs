//! HTTP server for the CineCast movie streamer
//!
//! Wires the injected movie resolver and the range-streaming core into an
//! axum router: a player page, a range-aware video route, and a health
//! check.

mod error;
mod player;
mod server;
mod state;
mod video;

pub use server::CineCastApi;
pub use state::{ServerState, StreamSettings};

/// Result type alias for server lifecycle operations
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;
