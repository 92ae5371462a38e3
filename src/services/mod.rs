//! Catalog provider seam and upstream clients

pub mod catalog;
pub mod ytmusic;

pub use catalog::{CatalogError, CatalogProvider, SONG_RESULT_LIMIT};
pub use ytmusic::YtMusicClient;
