//! YouTube Data API response parsers
//!
//! Parses `search.list` responses into video and playlist suggestions.

use serde::Deserialize;

use crate::error::Result;
use crate::types::{PlaylistLink, VideoLink};
use crate::url::{build_playlist_url, build_video_url};

#[derive(Debug, Deserialize)]
struct SearchListResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(default)]
    id: ResourceId,
    #[serde(default)]
    snippet: Snippet,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResourceId {
    video_id: Option<String>,
    playlist_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Snippet {
    #[serde(default)]
    title: String,
}

/// Parses a video search response
///
/// Items without a `videoId` (channels, playlists) are skipped.
///
/// # Errors
/// Returns `JsonError` if the body is not a search response
pub fn parse_youtube_videos(json: &str) -> Result<Vec<VideoLink>> {
    let response: SearchListResponse = serde_json::from_str(json)?;

    Ok(response
        .items
        .into_iter()
        .filter_map(|item| {
            let video_id = item.id.video_id.filter(|id| !id.is_empty())?;
            Some(VideoLink {
                title: decode_html_entities(&item.snippet.title),
                url: build_video_url(&video_id),
                video_id,
            })
        })
        .collect())
}

/// Parses a playlist search response and returns the first playlist
///
/// # Errors
/// Returns `JsonError` if the body is not a search response
pub fn parse_youtube_playlist(json: &str) -> Result<Option<PlaylistLink>> {
    let response: SearchListResponse = serde_json::from_str(json)?;

    Ok(response.items.into_iter().find_map(|item| {
        let playlist_id = item.id.playlist_id.filter(|id| !id.is_empty())?;
        Some(PlaylistLink {
            title: decode_html_entities(&item.snippet.title),
            url: build_playlist_url(&playlist_id),
            playlist_id,
        })
    }))
}

/// Snippet titles come back HTML-escaped
fn decode_html_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
