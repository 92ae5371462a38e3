//! Catalog provider interface
//!
//! The gateway core only needs one operation from the catalog: a text
//! search over the songs category returning loosely-shaped hits in
//! catalog ranking order. Everything else about the provider (session,
//! authentication, transport) stays behind this trait.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::RawTrack;

/// Result cap for one search. Fixed; the serving layer never asks for more.
pub const SONG_RESULT_LIMIT: usize = 8;

/// Catalog client errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Catalog request timed out")]
    Timeout,

    #[error("Catalog API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Text search over an external music catalog.
///
/// Implementations are constructed once at startup and shared read-only
/// across requests; no request mutates provider configuration.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Search the songs category for `query`, returning at most `limit`
    /// hits in catalog ranking order.
    async fn search_songs(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<RawTrack>, CatalogError>;
}
