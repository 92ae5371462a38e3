//! YouTube Music search client
//!
//! Talks to the InnerTube endpoint behind music.youtube.com using the
//! anonymous WEB_REMIX client context. Only the song shelf of the search
//! response is consumed; hits are handed back as loose [`RawTrack`]s and
//! field defaulting is left to the normalizer.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::models::{RawAlbum, RawArtist, RawThumbnail, RawTrack};
use crate::services::catalog::{CatalogError, CatalogProvider};

const SEARCH_URL: &str = "https://music.youtube.com/youtubei/v1/search?prettyPrint=false";
const ORIGIN: &str = "https://music.youtube.com";
const CLIENT_NAME: &str = "WEB_REMIX";
const CLIENT_VERSION: &str = "1.20240101.01.00";
/// Search params restricting results to the songs category.
const SONGS_FILTER_PARAMS: &str = "EgWKAQIIAWoMEA4QChADEAQQCRAF";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// YouTube Music API client
pub struct YtMusicClient {
    http_client: reqwest::Client,
}

impl YtMusicClient {
    pub fn new() -> Result<Self, CatalogError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        Ok(Self { http_client })
    }

    fn search_body(query: &str) -> Value {
        json!({
            "context": {
                "client": {
                    "clientName": CLIENT_NAME,
                    "clientVersion": CLIENT_VERSION,
                    "hl": "en",
                }
            },
            "query": query,
            "params": SONGS_FILTER_PARAMS,
        })
    }
}

#[async_trait]
impl CatalogProvider for YtMusicClient {
    async fn search_songs(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<RawTrack>, CatalogError> {
        tracing::debug!(query = %query, "Querying YouTube Music search");

        let response = self
            .http_client
            .post(SEARCH_URL)
            .header("Origin", ORIGIN)
            .json(&Self::search_body(query))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CatalogError::Timeout
                } else {
                    CatalogError::Network(e.to_string())
                }
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api(status.as_u16(), error_text));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))?;

        let tracks = parse_search_response(&body, limit);

        tracing::debug!(query = %query, count = tracks.len(), "Parsed song shelf");

        Ok(tracks)
    }
}

/// Walk the search response down to the song shelf and collect its items.
fn parse_search_response(body: &Value, limit: usize) -> Vec<RawTrack> {
    let mut tracks = Vec::new();

    let Some(tabs) = body
        .get("contents")
        .and_then(|c| c.get("tabbedSearchResultsRenderer"))
        .and_then(|t| t.get("tabs"))
        .and_then(|t| t.as_array())
    else {
        return tracks;
    };

    for tab in tabs {
        let Some(sections) = tab
            .get("tabRenderer")
            .and_then(|t| t.get("content"))
            .and_then(|c| c.get("sectionListRenderer"))
            .and_then(|s| s.get("contents"))
            .and_then(|c| c.as_array())
        else {
            continue;
        };

        for section in sections {
            if let Some(items) = section
                .get("musicShelfRenderer")
                .and_then(|s| s.get("contents"))
                .and_then(|c| c.as_array())
            {
                for item in items {
                    if tracks.len() == limit {
                        return tracks;
                    }
                    if let Some(track) = parse_shelf_item(item) {
                        tracks.push(track);
                    }
                }
            }
        }
    }

    tracks
}

/// Extract one loose track from a shelf item.
///
/// Returns `None` only for items that are not list entries at all (e.g.
/// "show all" links). A list entry missing sub-fields still yields a
/// `RawTrack`; whether it survives is the normalizer's call.
fn parse_shelf_item(item: &Value) -> Option<RawTrack> {
    let renderer = item.get("musicResponsiveListItemRenderer")?;

    // Video id lives in playlistItemData, or behind the play button overlay
    let video_id = renderer
        .get("playlistItemData")
        .and_then(|p| p.get("videoId"))
        .and_then(|v| v.as_str())
        .or_else(|| {
            renderer
                .get("overlay")
                .and_then(|o| o.get("musicItemThumbnailOverlayRenderer"))
                .and_then(|m| m.get("content"))
                .and_then(|c| c.get("musicPlayButtonRenderer"))
                .and_then(|m| m.get("playNavigationEndpoint"))
                .and_then(|p| p.get("watchEndpoint"))
                .and_then(|w| w.get("videoId"))
                .and_then(|v| v.as_str())
        })
        .map(str::to_string);

    let flex_columns = renderer.get("flexColumns").and_then(|f| f.as_array());

    let title = flex_columns
        .and_then(|cols| cols.first())
        .and_then(flex_column_first_run);

    // The second column interleaves artist links, the album link, and plain
    // text runs (separators, duration). Browse id prefixes tell them apart:
    // UC = artist channel, MPREb = album.
    let mut artists = Vec::new();
    let mut album = None;
    let mut run_duration = None;

    if let Some(runs) = flex_columns
        .and_then(|cols| cols.get(1))
        .and_then(|c| c.get("musicResponsiveListItemFlexColumnRenderer"))
        .and_then(|r| r.get("text"))
        .and_then(|t| t.get("runs"))
        .and_then(|r| r.as_array())
    {
        for run in runs {
            let Some(text) = run.get("text").and_then(|t| t.as_str()) else {
                continue;
            };

            match run
                .get("navigationEndpoint")
                .and_then(|n| n.get("browseEndpoint"))
                .and_then(|b| b.get("browseId"))
                .and_then(|b| b.as_str())
            {
                Some(id) if id.starts_with("UC") => {
                    artists.push(RawArtist {
                        name: text.to_string(),
                    });
                }
                Some(id) if id.starts_with("MPREb") => {
                    album = Some(RawAlbum {
                        name: text.to_string(),
                    });
                }
                _ => {
                    if looks_like_duration(text) {
                        run_duration = Some(text.to_string());
                    }
                }
            }
        }
    }

    // Some client versions put the duration in a trailing fixed column
    let duration = fixed_column_duration(renderer).or(run_duration);

    let thumbnails = renderer
        .get("thumbnail")
        .and_then(|t| t.get("musicThumbnailRenderer"))
        .and_then(|m| m.get("thumbnail"))
        .and_then(|t| t.get("thumbnails"))
        .and_then(|t| t.as_array())
        .map(|thumbs| {
            thumbs
                .iter()
                .filter_map(|t| t.get("url").and_then(|u| u.as_str()))
                .map(|url| RawThumbnail {
                    url: url.to_string(),
                })
                .collect()
        })
        .unwrap_or_default();

    Some(RawTrack {
        video_id,
        title,
        artists,
        album,
        duration,
        thumbnails,
    })
}

fn flex_column_first_run(column: &Value) -> Option<String> {
    column
        .get("musicResponsiveListItemFlexColumnRenderer")
        .and_then(|r| r.get("text"))
        .and_then(|t| t.get("runs"))
        .and_then(|r| r.as_array())
        .and_then(|a| a.first())
        .and_then(|r| r.get("text"))
        .and_then(|t| t.as_str())
        .map(str::to_string)
}

fn fixed_column_duration(renderer: &Value) -> Option<String> {
    renderer
        .get("fixedColumns")
        .and_then(|f| f.as_array())
        .and_then(|a| a.first())
        .and_then(|c| c.get("musicResponsiveListItemFixedColumnRenderer"))
        .and_then(|r| r.get("text"))
        .and_then(|t| t.get("runs"))
        .and_then(|r| r.as_array())
        .and_then(|a| a.first())
        .and_then(|r| r.get("text"))
        .and_then(|t| t.as_str())
        .map(str::to_string)
}

/// Matches the M:SS / H:MM:SS text upstream uses for track lengths.
fn looks_like_duration(text: &str) -> bool {
    let parts: Vec<&str> = text.split(':').collect();
    if !(2..=3).contains(&parts.len()) {
        return false;
    }
    parts
        .iter()
        .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = YtMusicClient::new();
        assert!(client.is_ok());
    }

    #[test]
    fn test_duration_shapes() {
        assert!(looks_like_duration("3:21"));
        assert!(looks_like_duration("1:02:03"));
        assert!(!looks_like_duration("Artist A"));
        assert!(!looks_like_duration("3:21 remix"));
        assert!(!looks_like_duration("321"));
        assert!(!looks_like_duration(":21"));
    }

    fn shelf_item(video_id: Option<&str>) -> Value {
        let mut renderer = json!({
            "flexColumns": [
                {
                    "musicResponsiveListItemFlexColumnRenderer": {
                        "text": { "runs": [{ "text": "Song A" }] }
                    }
                },
                {
                    "musicResponsiveListItemFlexColumnRenderer": {
                        "text": {
                            "runs": [
                                {
                                    "text": "Artist A",
                                    "navigationEndpoint": {
                                        "browseEndpoint": { "browseId": "UCabc123" }
                                    }
                                },
                                { "text": " \u{2022} " },
                                {
                                    "text": "Album A",
                                    "navigationEndpoint": {
                                        "browseEndpoint": { "browseId": "MPREb_xyz" }
                                    }
                                },
                                { "text": " \u{2022} " },
                                { "text": "3:21" }
                            ]
                        }
                    }
                }
            ],
            "thumbnail": {
                "musicThumbnailRenderer": {
                    "thumbnail": {
                        "thumbnails": [
                            { "url": "lo", "width": 60, "height": 60 },
                            { "url": "hi", "width": 120, "height": 120 }
                        ]
                    }
                }
            }
        });

        if let Some(id) = video_id {
            renderer["playlistItemData"] = json!({ "videoId": id });
        }

        json!({ "musicResponsiveListItemRenderer": renderer })
    }

    fn search_response(items: Vec<Value>) -> Value {
        json!({
            "contents": {
                "tabbedSearchResultsRenderer": {
                    "tabs": [{
                        "tabRenderer": {
                            "content": {
                                "sectionListRenderer": {
                                    "contents": [{
                                        "musicShelfRenderer": { "contents": items }
                                    }]
                                }
                            }
                        }
                    }]
                }
            }
        })
    }

    #[test]
    fn test_parse_song_shelf() {
        let body = search_response(vec![shelf_item(Some("v1"))]);
        let tracks = parse_search_response(&body, 8);

        assert_eq!(tracks.len(), 1);
        let track = &tracks[0];
        assert_eq!(track.video_id.as_deref(), Some("v1"));
        assert_eq!(track.title.as_deref(), Some("Song A"));
        assert_eq!(track.artists.len(), 1);
        assert_eq!(track.artists[0].name, "Artist A");
        assert_eq!(track.album.as_ref().unwrap().name, "Album A");
        assert_eq!(track.duration.as_deref(), Some("3:21"));
        assert_eq!(track.thumbnails.len(), 2);
        assert_eq!(track.thumbnails[1].url, "hi");
    }

    #[test]
    fn test_parse_keeps_item_without_video_id() {
        let body = search_response(vec![shelf_item(None)]);
        let tracks = parse_search_response(&body, 8);

        // Still surfaced as a loose track; the normalizer drops it later
        assert_eq!(tracks.len(), 1);
        assert!(tracks[0].video_id.is_none());
    }

    #[test]
    fn test_parse_respects_limit() {
        let ids: Vec<String> = (0..12).map(|i| format!("v{i}")).collect();
        let items = ids.iter().map(|id| shelf_item(Some(id.as_str()))).collect();
        let tracks = parse_search_response(&search_response(items), 8);

        assert_eq!(tracks.len(), 8);
        assert_eq!(tracks[7].video_id.as_deref(), Some("v7"));
    }

    #[test]
    fn test_parse_skips_non_list_items() {
        let body = search_response(vec![
            json!({ "itemSectionRenderer": {} }),
            shelf_item(Some("v1")),
        ]);
        let tracks = parse_search_response(&body, 8);

        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].video_id.as_deref(), Some("v1"));
    }

    #[test]
    fn test_parse_empty_response() {
        assert!(parse_search_response(&json!({}), 8).is_empty());
    }
}
