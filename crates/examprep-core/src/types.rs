//! Core data types for the exam resource scraper
//!
//! Contains the flat record produced for each exam query and the
//! resource types it aggregates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Everything gathered for a single exam query
///
/// Created once per query per run, serialized, and discarded.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExamResources {
    /// Trimmed exam query (e.g., "NEET", "SSC CGL")
    pub query: String,

    /// Overview pulled from the exam's Wikipedia article
    pub wikipedia: WikiInfo,

    /// Suggested video lectures
    pub videos: Vec<VideoLink>,

    /// One suggested preparation playlist
    pub playlist: Option<PlaylistLink>,

    /// Suggested preparation books
    pub books: Vec<BookSuggestion>,

    /// Links to free solved previous-year question papers
    pub free_pyqs: Vec<PyqLink>,

    /// Sources that failed while building this record
    #[serde(default)]
    pub failures: Vec<SourceFailure>,
}

impl ExamResources {
    /// Creates an empty record for a query
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Total number of individual resources in the record
    ///
    /// Counts the Wikipedia article as one resource when a title was found.
    pub fn resource_count(&self) -> usize {
        usize::from(self.wikipedia.title.is_some())
            + self.videos.len()
            + usize::from(self.playlist.is_some())
            + self.books.len()
            + self.free_pyqs.len()
    }
}

/// Overview sections extracted from a Wikipedia article
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WikiInfo {
    /// Title of the best-matching article
    pub title: Option<String>,

    /// Lead paragraph or "introduction" section
    pub summary: Option<String>,

    /// Syllabus or curriculum text
    pub syllabus: Option<String>,

    /// Exam pattern, format, or structure text
    pub pattern: Option<String>,

    /// All headed sections in article order
    pub other_sections: Vec<WikiSection>,
}

impl WikiInfo {
    /// Looks up a section by its lower-cased heading
    pub fn section(&self, heading: &str) -> Option<&str> {
        self.other_sections
            .iter()
            .find(|s| s.heading == heading)
            .map(|s| s.text.as_str())
    }
}

/// A single headed section of an article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WikiSection {
    /// Lower-cased heading text
    pub heading: String,

    /// Section body, paragraphs separated by a blank line
    pub text: String,
}

/// A YouTube video suggestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoLink {
    pub title: String,

    /// YouTube video ID (e.g., "dQw4w9WgXcQ")
    pub video_id: String,

    /// Watch URL built from the ID
    pub url: String,
}

/// A YouTube playlist suggestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistLink {
    pub title: String,
    pub playlist_id: String,
    pub url: String,
}

/// A book suggestion from Google Books
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BookSuggestion {
    pub title: Option<String>,
    pub authors: Vec<String>,
    pub publisher: Option<String>,
    pub info_link: Option<String>,
}

/// A link to a free previous-year question paper
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PyqLink {
    /// Site name (e.g., "Examsnet")
    pub site: String,

    /// Exam label the page belongs to (e.g., "JEE Mains")
    pub exam: String,

    /// Anchor text, may be empty
    pub title: String,

    /// Absolute link
    pub link: String,
}

/// Upstream source a resource comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Wikipedia,
    Youtube,
    YoutubePlaylist,
    GoogleBooks,
    Pyq,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Source::Wikipedia => "wikipedia",
            Source::Youtube => "youtube",
            Source::YoutubePlaylist => "youtube_playlist",
            Source::GoogleBooks => "google_books",
            Source::Pyq => "pyq",
        };
        f.write_str(name)
    }
}

/// A source that failed while building a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFailure {
    pub source: Source,
    pub message: String,
}
