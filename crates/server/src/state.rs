//! Shared router state: the injected movie resolver and streaming knobs

use std::sync::Arc;

use library::MovieResolver;
use stream::{DEFAULT_CHUNK_SIZE, DEFAULT_WINDOW};

/// Tunables for the streaming core
#[derive(Debug, Clone, Copy)]
pub struct StreamSettings {
    /// Byte cap for a single response window; zero disables the cap
    pub window: u64,
    /// Read/write chunk size for the copy loop
    pub chunk_size: u64,
}

impl Default for StreamSettings {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// State shared by all routes
#[derive(Clone)]
pub struct ServerState {
    resolver: Arc<dyn MovieResolver>,
    settings: StreamSettings,
}

impl ServerState {
    /// Create state around an injected movie resolver
    pub fn new(resolver: Arc<dyn MovieResolver>, settings: StreamSettings) -> Self {
        Self { resolver, settings }
    }

    /// The injected movie resolver
    pub fn resolver(&self) -> &dyn MovieResolver {
        self.resolver.as_ref()
    }

    /// Streaming tunables
    pub fn settings(&self) -> StreamSettings {
        self.settings
    }
}
