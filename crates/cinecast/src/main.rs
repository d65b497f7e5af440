use std::sync::Arc;

use library::DirectoryLibrary;
use server::CineCastApi;
use tracing_subscriber::EnvFilter;

mod config;

use config::Config;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("serving movies from {}", config.movie_dir.display());

    let resolver = Arc::new(DirectoryLibrary::new(config.movie_dir.clone()));
    let api = CineCastApi::new(resolver, config.stream_settings());

    if let Err(e) = api.serve(&config.host, config.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
