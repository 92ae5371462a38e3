//! Upstream track shape and its normalization into the served record.
//!
//! The catalog returns loosely-shaped hits where any sub-field may be
//! missing. `RawTrack` models that explicitly with optional fields;
//! `SongRecord` is the strict, stable shape clients render.

use serde::Serialize;

/// One artist credit on an upstream hit.
#[derive(Debug, Clone, Default)]
pub struct RawArtist {
    pub name: String,
}

/// Album reference on an upstream hit.
#[derive(Debug, Clone, Default)]
pub struct RawAlbum {
    pub name: String,
}

/// One image descriptor. Upstream orders thumbnail arrays ascending by size.
#[derive(Debug, Clone, Default)]
pub struct RawThumbnail {
    pub url: String,
}

/// One upstream search hit.
///
/// Every field is optionally present. Absence is data, not a fault: the
/// normalizer substitutes defaults rather than failing the request.
#[derive(Debug, Clone, Default)]
pub struct RawTrack {
    pub video_id: Option<String>,
    pub title: Option<String>,
    pub artists: Vec<RawArtist>,
    pub album: Option<RawAlbum>,
    pub duration: Option<String>,
    pub thumbnails: Vec<RawThumbnail>,
}

/// Normalized track shape served to clients.
///
/// Construction goes through [`SongRecord::from_raw`]; a record always
/// carries a non-empty `video_id`.
#[derive(Debug, Serialize)]
pub struct SongRecord {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub duration: String,
    #[serde(rename = "videoId")]
    pub video_id: String,
    pub thumbnail: String,
}

/// Substituted when upstream omits a duration.
const DEFAULT_DURATION: &str = "0:00";

impl SongRecord {
    /// Normalize one upstream hit into the served shape.
    ///
    /// Returns `None` when the hit has no video id (absent or empty);
    /// such hits never appear in search results. All other missing
    /// fields fall back to defaults:
    /// - `title`, `artist`, `album`, `thumbnail`: empty string
    /// - `duration`: `"0:00"`, passed through verbatim otherwise
    ///
    /// Only the first credited artist is surfaced. The thumbnail is the
    /// last of the upstream array (largest by upstream ordering).
    pub fn from_raw(raw: RawTrack) -> Option<Self> {
        let video_id = raw.video_id.filter(|id| !id.is_empty())?;

        let artist = raw
            .artists
            .into_iter()
            .next()
            .map(|a| a.name)
            .unwrap_or_default();

        let thumbnail = raw
            .thumbnails
            .into_iter()
            .last()
            .map(|t| t.url)
            .unwrap_or_default();

        Some(Self {
            title: raw.title.unwrap_or_default(),
            artist,
            album: raw.album.map(|a| a.name).unwrap_or_default(),
            duration: raw.duration.unwrap_or_else(|| DEFAULT_DURATION.to_string()),
            video_id,
            thumbnail,
        })
    }
}
