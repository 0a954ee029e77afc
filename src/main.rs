use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use movie_reco_api::api::{create_router, AppState, SessionStore};
use movie_reco_api::config::Config;
use movie_reco_api::services::{Catalog, TmdbProvider};
use movie_reco_api::views::ImageUrls;

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::from_env()?;

    let catalog = Catalog::load(&config.catalog_path)?;
    let provider = Arc::new(TmdbProvider::new(
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
        config.tmdb_language.clone(),
    ));
    let images = ImageUrls::new(config.tmdb_image_url.clone());

    let sessions = SessionStore::new(config.session_idle_timeout(), config.max_sessions);
    spawn_session_sweeper(sessions.clone());

    let state = AppState::new(catalog, provider, images).with_sessions(sessions);
    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}

/// Periodically drops idle sessions so abandoned ones do not pile up
fn spawn_session_sweeper(sessions: SessionStore) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            sessions.evict_idle().await;
        }
    });
}

fn init_tracing() {
    // RUST_LOG overrides the default filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("movie_reco_api=debug,tower_http=debug,axum=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
