//! Router assembly and server lifecycle

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use library::MovieResolver;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::player::player_page;
use crate::state::{ServerState, StreamSettings};
use crate::video::serve_video;

/// Movie streaming API for managing the HTTP server
#[derive(Clone)]
pub struct CineCastApi {
    state: ServerState,
}

impl CineCastApi {
    /// Create a new API around an injected movie resolver
    ///
    /// # Arguments
    /// * `resolver` - Maps movie identifiers to files on disk
    /// * `settings` - Window and chunk-size tunables for the streaming core
    pub fn new(resolver: Arc<dyn MovieResolver>, settings: StreamSettings) -> Self {
        Self {
            state: ServerState::new(resolver, settings),
        }
    }

    /// Create the axum router with all routes configured
    pub fn router(&self) -> Router {
        Router::new()
            .route("/stream/:movie", get(player_page))
            .route("/video/:movie", get(serve_video))
            .route("/health", get(health_check))
            .with_state(self.state.clone())
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
    }

    /// Start the server
    ///
    /// # Arguments
    /// * `host` - Host to bind to (e.g., "0.0.0.0")
    /// * `port` - Port to bind to (e.g., 3000)
    pub async fn serve(self, host: &str, port: u16) -> crate::Result<()> {
        let addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        tracing::info!("CineCast listening on {}", addr);

        axum::serve(listener, self.router()).await?;

        Ok(())
    }
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "CineCast server running"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use library::DirectoryLibrary;
    use tower::util::ServiceExt;

    #[tokio::test]
    async fn test_health_check() {
        let dir = tempfile::tempdir().unwrap();
        let api = CineCastApi::new(
            Arc::new(DirectoryLibrary::new(dir.path())),
            StreamSettings::default(),
        );

        let response = api
            .router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_404() {
        let dir = tempfile::tempdir().unwrap();
        let api = CineCastApi::new(
            Arc::new(DirectoryLibrary::new(dir.path())),
            StreamSettings::default(),
        );

        let response = api
            .router()
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
