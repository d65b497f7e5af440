//! Environment-driven configuration
//!
//! Every knob has a default, so a bare `cinecast` next to a `movies/`
//! directory just works; `.env` or real environment variables override.

use std::path::PathBuf;

use server::StreamSettings;

/// Runtime configuration read from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Host to bind to (`CINECAST_HOST`, default 0.0.0.0)
    pub host: String,
    /// Port to bind to (`CINECAST_PORT`, default 3000)
    pub port: u16,
    /// Directory holding movie files (`CINECAST_MOVIE_DIR`, default `movies`)
    pub movie_dir: PathBuf,
    /// Per-response window cap in bytes (`CINECAST_WINDOW_BYTES`)
    pub window: u64,
    /// Copy loop chunk size in bytes (`CINECAST_CHUNK_BYTES`)
    pub chunk_size: u64,
}

impl Config {
    /// Read configuration from the environment, falling back to defaults
    ///
    /// # Errors
    /// Returns an error when a variable is set but fails to parse
    pub fn from_env() -> Result<Self, String> {
        let defaults = StreamSettings::default();

        Ok(Self {
            host: env_or("CINECAST_HOST", "0.0.0.0"),
            port: parse_env("CINECAST_PORT", 3000)?,
            movie_dir: PathBuf::from(env_or("CINECAST_MOVIE_DIR", "movies")),
            window: parse_env("CINECAST_WINDOW_BYTES", defaults.window)?,
            chunk_size: parse_env("CINECAST_CHUNK_BYTES", defaults.chunk_size)?,
        })
    }

    /// Streaming tunables for the server
    pub fn stream_settings(&self) -> StreamSettings {
        StreamSettings {
            window: self.window,
            chunk_size: self.chunk_size,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T, String> {
    match std::env::var(key) {
        Ok(value) => value
            .parse()
            .map_err(|_| format!("{} must be a number, got '{}'", key, value)),
        Err(_) => Ok(default),
    }
}
