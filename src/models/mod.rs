//! Data models for catalog search

pub mod song;

pub use song::{RawAlbum, RawArtist, RawThumbnail, RawTrack, SongRecord};
