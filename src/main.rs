//! tunegate - song search gateway service

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use tunegate::config::Config;
use tunegate::services::YtMusicClient;
use tunegate::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting tunegate (song search gateway)");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = Config::load()?;

    // One catalog client for the lifetime of the process, injected into
    // every handler through AppState
    let catalog = YtMusicClient::new()?;
    let state = AppState::new(Arc::new(catalog));

    let app = tunegate::build_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
