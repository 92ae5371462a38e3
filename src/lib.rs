//! tunegate - song search gateway
//!
//! A single-endpoint HTTP gateway: free-text queries go in, the YouTube
//! Music catalog is searched, and normalized song records come back in a
//! stable shape the web client can render directly.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use std::sync::Arc;

use axum::Router;
use chrono::{DateTime, Utc};
use tower_http::cors::CorsLayer;

use crate::services::CatalogProvider;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Catalog client, constructed once at startup and shared read-only
    pub catalog: Arc<dyn CatalogProvider>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(catalog: Arc<dyn CatalogProvider>) -> Self {
        Self {
            catalog,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
///
/// The web client is served from a different origin, so CORS stays wide
/// open with no credential restrictions.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::search_routes())
        .merge(api::health_routes())
        .with_state(state)
        .layer(CorsLayer::permissive())
}
