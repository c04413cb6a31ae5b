//! Google Books response parser

use serde::Deserialize;

use crate::error::Result;
use crate::types::BookSuggestion;

#[derive(Debug, Deserialize)]
struct VolumesResponse {
    #[serde(default)]
    items: Vec<Volume>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Volume {
    #[serde(default)]
    volume_info: VolumeInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeInfo {
    title: Option<String>,
    #[serde(default)]
    authors: Vec<String>,
    publisher: Option<String>,
    info_link: Option<String>,
}

/// Parses a `volumes` search response into at most `max` suggestions
///
/// # Errors
/// Returns `JsonError` if the body is not a volumes response
pub fn parse_books(json: &str, max: usize) -> Result<Vec<BookSuggestion>> {
    let response: VolumesResponse = serde_json::from_str(json)?;

    Ok(response
        .items
        .into_iter()
        .take(max)
        .map(|volume| {
            let info = volume.volume_info;
            BookSuggestion {
                title: info.title,
                authors: info.authors,
                publisher: info.publisher,
                info_link: info.info_link,
            }
        })
        .collect())
}
