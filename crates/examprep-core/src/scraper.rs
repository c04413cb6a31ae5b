//! Main scraper API
//!
//! Combines the HTTP client with the per-source parsers and aggregates
//! everything found for an exam into one [`ExamResources`] record.

use tracing::{debug, info, instrument, warn};

use crate::client::{ClientConfig, ExamClient};
use crate::error::{ExamPrepError, Result};
use crate::parser::{
    extract_wiki_sections, parse_books, parse_pyq_links, parse_wiki_search,
    parse_youtube_playlist, parse_youtube_videos, select_wiki_info,
};
use crate::sources::pyq_sources;
use crate::types::{
    BookSuggestion, ExamResources, PlaylistLink, PyqLink, Source, SourceFailure, VideoLink,
    WikiInfo,
};
use crate::url::{
    Endpoints, YoutubeKind, build_books_url, build_wiki_page_url, build_wiki_search_url,
    build_youtube_search_url,
};

/// Scraper configuration
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub client: ClientConfig,
    pub endpoints: Endpoints,
    /// YouTube Data API key; video lookups are skipped without one
    pub youtube_api_key: Option<String>,
    /// Maximum videos per record (default: 6)
    pub max_videos: usize,
    /// Maximum books per record (default: 6)
    pub max_books: usize,
    /// Maximum PYQ links per record (default: 5)
    pub max_pyqs: usize,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            endpoints: Endpoints::default(),
            youtube_api_key: None,
            max_videos: 6,
            max_books: 6,
            max_pyqs: 5,
        }
    }
}

/// Which optional source groups to include in a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// Videos and playlist
    pub include_videos: bool,
    /// Books and free PYQs
    pub include_books: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            include_videos: true,
            include_books: true,
        }
    }
}

/// Main scraper API
///
/// Every source is fetched sequentially through one rate-limited client.
pub struct ExamScraper {
    client: ExamClient,
    config: ScraperConfig,
}

impl ExamScraper {
    /// Create a new scraper with default configuration
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails
    pub fn new() -> Result<Self> {
        Self::with_config(ScraperConfig::default())
    }

    /// Create a new scraper with custom configuration
    ///
    /// An empty or whitespace API key counts as no key.
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails
    pub fn with_config(mut config: ScraperConfig) -> Result<Self> {
        config.youtube_api_key = config
            .youtube_api_key
            .take()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        let client = ExamClient::with_config(config.client.clone())?;
        Ok(Self { client, config })
    }

    /// Configuration in use
    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// Whether YouTube lookups will be made
    pub fn has_youtube_key(&self) -> bool {
        self.config.youtube_api_key.is_some()
    }

    fn youtube_key(&self) -> Result<&str> {
        self.config
            .youtube_api_key
            .as_deref()
            .ok_or_else(|| ExamPrepError::MissingApiKey("YouTube Data API".to_string()))
    }

    /// Find the best-matching Wikipedia article title
    ///
    /// Searches for `"{query} exam"` first and falls back to the bare query.
    /// A failed first search is logged and the fallback still runs; only an
    /// error from the bare-query search is returned.
    pub async fn find_wiki_title(&self, query: &str) -> Result<Option<String>> {
        let exam_query = format!("{} exam", query);
        match self.search_wiki_title(&exam_query).await {
            Ok(Some(title)) => return Ok(Some(title)),
            Ok(None) => {}
            Err(e) => warn!(candidate = %exam_query, error = %e, "wikipedia search failed"),
        }
        self.search_wiki_title(query).await
    }

    async fn search_wiki_title(&self, candidate: &str) -> Result<Option<String>> {
        let url = build_wiki_search_url(&self.config.endpoints, candidate);
        let body = self.client.fetch(&url).await?;
        let title = parse_wiki_search(&body)?;
        if let Some(title) = &title {
            debug!(%candidate, %title, "wikipedia match");
        }
        Ok(title)
    }

    /// Fetch and parse one Wikipedia article
    pub async fn wiki_page(&self, title: &str) -> Result<WikiInfo> {
        let url = build_wiki_page_url(&self.config.endpoints, title);
        let html = self.client.fetch(&url).await?;
        let sections = extract_wiki_sections(&html)?;
        Ok(select_wiki_info(Some(title.to_string()), sections))
    }

    /// Fetch the Wikipedia overview for an exam
    ///
    /// # Returns
    /// An empty [`WikiInfo`] when no article matches, and one holding only
    /// the title when the article page itself is missing.
    pub async fn wiki_info(&self, query: &str) -> Result<WikiInfo> {
        let Some(title) = self.find_wiki_title(query).await? else {
            return Ok(WikiInfo::default());
        };

        match self.wiki_page(&title).await {
            Err(ExamPrepError::NotFound(_)) => Ok(WikiInfo {
                title: Some(title),
                ..WikiInfo::default()
            }),
            other => other,
        }
    }

    /// Search YouTube for preparation videos
    ///
    /// Returns an empty list without making a request when no API key is set.
    pub async fn search_videos(&self, query: &str, max: usize) -> Result<Vec<VideoLink>> {
        let Ok(key) = self.youtube_key() else {
            debug!("no YouTube API key, skipping video search");
            return Ok(Vec::new());
        };
        if max == 0 {
            return Ok(Vec::new());
        }

        let url =
            build_youtube_search_url(&self.config.endpoints, query, YoutubeKind::Video, max, key);
        let body = self.client.fetch(&url).await?;
        let mut videos = parse_youtube_videos(&body)?;
        videos.truncate(max);
        Ok(videos)
    }

    /// Search YouTube for one preparation playlist
    ///
    /// Returns `None` without making a request when no API key is set.
    pub async fn search_playlist(&self, query: &str) -> Result<Option<PlaylistLink>> {
        let Ok(key) = self.youtube_key() else {
            debug!("no YouTube API key, skipping playlist search");
            return Ok(None);
        };

        let url =
            build_youtube_search_url(&self.config.endpoints, query, YoutubeKind::Playlist, 1, key);
        let body = self.client.fetch(&url).await?;
        parse_youtube_playlist(&body)
    }

    /// Search Google Books for preparation books
    pub async fn search_books(&self, query: &str, max: usize) -> Result<Vec<BookSuggestion>> {
        if max == 0 {
            return Ok(Vec::new());
        }
        let url = build_books_url(&self.config.endpoints, query, max);
        let body = self.client.fetch(&url).await?;
        parse_books(&body, max)
    }

    /// Scrape free previous-year question paper links
    ///
    /// A page that fails to load is skipped and the next one tried.
    pub async fn fetch_free_pyqs(&self, query: &str, max: usize) -> Vec<PyqLink> {
        let mut failures = Vec::new();
        self.collect_pyqs(query, max, &mut failures).await
    }

    async fn collect_pyqs(
        &self,
        query: &str,
        max: usize,
        failures: &mut Vec<SourceFailure>,
    ) -> Vec<PyqLink> {
        let mut links: Vec<PyqLink> = Vec::new();

        for source in pyq_sources(query, &self.config.endpoints) {
            let remaining = max.saturating_sub(links.len());
            if remaining == 0 {
                break;
            }

            let page = match self.client.fetch(&source.url).await {
                Ok(html) => parse_pyq_links(&html, &source, remaining),
                Err(e) => Err(e),
            };

            match page {
                Ok(found) => {
                    debug!(site = source.site, count = found.len(), "pyq links");
                    for link in found {
                        // a link listed on both sites is kept once
                        if !links.iter().any(|l| l.link == link.link) {
                            links.push(link);
                        }
                    }
                }
                Err(e) => {
                    warn!(site = source.site, url = %source.url, error = %e, "pyq page failed");
                    failures.push(SourceFailure {
                        source: Source::Pyq,
                        message: format!("{}: {}", source.site, e),
                    });
                }
            }
        }

        links
    }

    /// Fetch everything known about an exam
    ///
    /// Source failures are logged and listed in the record's `failures`;
    /// the rest of the record is still filled in.
    ///
    /// # Errors
    /// - `InvalidQuery` if the query is empty or whitespace only
    ///
    /// # Example
    /// ```no_run
    /// # async fn example() -> examprep_core::Result<()> {
    /// use examprep_core::{ExamScraper, FetchOptions};
    /// let scraper = ExamScraper::new()?;
    /// let record = scraper.fetch_exam_info("NEET", FetchOptions::default()).await?;
    /// println!("{:?}", record.wikipedia.title);
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self, options))]
    pub async fn fetch_exam_info(
        &self,
        query: &str,
        options: FetchOptions,
    ) -> Result<ExamResources> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ExamPrepError::InvalidQuery(
                "Exam query cannot be empty".to_string(),
            ));
        }

        let mut record = ExamResources::new(query);
        let failures = &mut record.failures;

        record.wikipedia = match self.find_wiki_title(query).await {
            Ok(Some(title)) => match self.wiki_page(&title).await {
                Ok(info) => info,
                Err(e) => {
                    note_failure(failures, Source::Wikipedia, &e);
                    WikiInfo {
                        title: Some(title),
                        ..WikiInfo::default()
                    }
                }
            },
            Ok(None) => WikiInfo::default(),
            Err(e) => {
                note_failure(failures, Source::Wikipedia, &e);
                WikiInfo::default()
            }
        };

        if options.include_videos {
            record.videos = or_note(
                failures,
                Source::Youtube,
                self.search_videos(query, self.config.max_videos).await,
            );
            record.playlist = or_note(
                failures,
                Source::YoutubePlaylist,
                self.search_playlist(query).await,
            );
        }

        if options.include_books {
            record.books = or_note(
                failures,
                Source::GoogleBooks,
                self.search_books(query, self.config.max_books).await,
            );
            record.free_pyqs = self
                .collect_pyqs(query, self.config.max_pyqs, failures)
                .await;
        }

        info!(
            resources = record.resource_count(),
            failures = record.failures.len(),
            "fetched exam resources"
        );
        Ok(record)
    }

    /// Fetch records for several exams, one after another
    ///
    /// # Errors
    /// - `InvalidQuery` if any query is empty or whitespace only
    pub async fn fetch_many<S: AsRef<str>>(
        &self,
        queries: &[S],
        options: FetchOptions,
    ) -> Result<Vec<ExamResources>> {
        if queries.iter().any(|q| q.as_ref().trim().is_empty()) {
            return Err(ExamPrepError::InvalidQuery(
                "Exam query cannot be empty".to_string(),
            ));
        }

        let mut records = Vec::with_capacity(queries.len());
        for query in queries {
            records.push(self.fetch_exam_info(query.as_ref(), options).await?);
        }
        Ok(records)
    }
}

fn note_failure(failures: &mut Vec<SourceFailure>, source: Source, error: &ExamPrepError) {
    warn!(%source, %error, "source failed");
    failures.push(SourceFailure {
        source,
        message: error.to_string(),
    });
}

fn or_note<T: Default>(failures: &mut Vec<SourceFailure>, source: Source, result: Result<T>) -> T {
    result.unwrap_or_else(|e| {
        note_failure(failures, source, &e);
        T::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scraper_creation() {
        assert!(ExamScraper::new().is_ok());
    }

    #[test]
    fn test_scraper_config_default() {
        let config = ScraperConfig::default();
        assert_eq!(config.max_videos, 6);
        assert_eq!(config.max_books, 6);
        assert_eq!(config.max_pyqs, 5);
        assert!(config.youtube_api_key.is_none());
    }

    #[test]
    fn test_blank_api_key_treated_as_missing() {
        let scraper = ExamScraper::with_config(ScraperConfig {
            youtube_api_key: Some("   ".to_string()),
            ..ScraperConfig::default()
        })
        .unwrap();
        assert!(!scraper.has_youtube_key());
        assert!(matches!(
            scraper.youtube_key(),
            Err(ExamPrepError::MissingApiKey(_))
        ));
    }

    #[tokio::test]
    async fn test_search_videos_without_key_is_empty() {
        let scraper = ExamScraper::new().unwrap();
        let videos = scraper.search_videos("NEET", 6).await.unwrap();
        assert!(videos.is_empty());
        assert_eq!(scraper.search_playlist("NEET").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_fetch_exam_info_empty_query() {
        let scraper = ExamScraper::new().unwrap();
        let result = scraper.fetch_exam_info("   ", FetchOptions::default()).await;
        match result {
            Err(ExamPrepError::InvalidQuery(msg)) => assert!(msg.contains("empty")),
            _ => panic!("Expected InvalidQuery error"),
        }
    }

    #[tokio::test]
    async fn test_fetch_many_rejects_blank_entry() {
        let scraper = ExamScraper::new().unwrap();
        let result = scraper
            .fetch_many(&["NEET", ""], FetchOptions::default())
            .await;
        assert!(matches!(result, Err(ExamPrepError::InvalidQuery(_))));
    }

    #[tokio::test]
    async fn test_fetch_free_pyqs_unknown_exam_makes_no_requests() {
        let scraper = ExamScraper::new().unwrap();
        assert!(scraper.fetch_free_pyqs("CLAT", 5).await.is_empty());
    }

    #[test]
    fn test_or_note_records_failure() {
        let mut failures = Vec::new();
        let value: Vec<VideoLink> =
            or_note(&mut failures, Source::Youtube, Err(ExamPrepError::RateLimited));
        assert!(value.is_empty());
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].source, Source::Youtube);
        assert_eq!(failures[0].message, "Rate limited - too many requests");
    }
}
