//! Playlist Manager Backend
//!
//! A REST API serving CRUD operations over in-memory songs and playlists.

use playlist_manager_backend::{config::Config, server, state::AppState};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load configuration
    let config = Config::from_env();
    info!("Configuration loaded: {:?}", config);

    // State lives for the process lifetime; nothing is persisted
    let app_state = AppState::shared();

    server::run(&config, app_state).await
}
