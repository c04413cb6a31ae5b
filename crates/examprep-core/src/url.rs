//! URL helper functions
//!
//! Provides the upstream endpoints and functions for building every
//! request URL the scraper issues, plus link resolution for scraped pages.

use reqwest::Url;

/// Base URLs of every upstream the scraper talks to
///
/// Defaults point at the public services; tests point them at a mock server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// MediaWiki action API (search)
    pub wikipedia_api: String,
    /// Wikipedia REST API root (page HTML)
    pub wikipedia_rest: String,
    /// YouTube Data API v3 root
    pub youtube_api: String,
    /// Google Books API v1 root
    pub books_api: String,
    /// Examsnet site root
    pub examsnet: String,
    /// Selfstudys site root
    pub selfstudys: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            wikipedia_api: "https://en.wikipedia.org/w/api.php".to_string(),
            wikipedia_rest: "https://en.wikipedia.org/api/rest_v1".to_string(),
            youtube_api: "https://www.googleapis.com/youtube/v3".to_string(),
            books_api: "https://www.googleapis.com/books/v1".to_string(),
            examsnet: "https://www.examsnet.com".to_string(),
            selfstudys: "https://www.selfstudys.com".to_string(),
        }
    }
}

impl Endpoints {
    /// Points every endpoint at a single base URL, keeping the default paths
    ///
    /// # Example
    /// ```
    /// use examprep_core::url::Endpoints;
    /// let endpoints = Endpoints::with_base("http://127.0.0.1:8080");
    /// assert_eq!(endpoints.wikipedia_api, "http://127.0.0.1:8080/w/api.php");
    /// assert_eq!(endpoints.examsnet, "http://127.0.0.1:8080/examsnet");
    /// ```
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            wikipedia_api: format!("{}/w/api.php", base),
            wikipedia_rest: format!("{}/api/rest_v1", base),
            youtube_api: format!("{}/youtube/v3", base),
            books_api: format!("{}/books/v1", base),
            examsnet: format!("{}/examsnet", base),
            selfstudys: format!("{}/selfstudys", base),
        }
    }
}

/// Kind of YouTube search result requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YoutubeKind {
    Video,
    Playlist,
}

impl YoutubeKind {
    fn as_str(self) -> &'static str {
        match self {
            YoutubeKind::Video => "video",
            YoutubeKind::Playlist => "playlist",
        }
    }
}

/// Builds the Wikipedia full-text search URL
///
/// # Example
/// ```
/// use examprep_core::url::{build_wiki_search_url, Endpoints};
/// let url = build_wiki_search_url(&Endpoints::default(), "NEET exam");
/// assert_eq!(
///     url,
///     "https://en.wikipedia.org/w/api.php?action=query&list=search&srsearch=NEET%20exam&format=json&srlimit=5"
/// );
/// ```
pub fn build_wiki_search_url(endpoints: &Endpoints, query: &str) -> String {
    format!(
        "{}?action=query&list=search&srsearch={}&format=json&srlimit=5",
        endpoints.wikipedia_api,
        urlencoding::encode(query)
    )
}

/// Turns an article title into its URL slug (spaces become underscores)
pub fn wiki_slug(title: &str) -> String {
    urlencoding::encode(&title.trim().replace(' ', "_")).into_owned()
}

/// Builds the Wikipedia REST URL returning an article's HTML
///
/// # Example
/// ```
/// use examprep_core::url::{build_wiki_page_url, Endpoints};
/// let url = build_wiki_page_url(&Endpoints::default(), "Common Law Admission Test");
/// assert_eq!(
///     url,
///     "https://en.wikipedia.org/api/rest_v1/page/html/Common_Law_Admission_Test"
/// );
/// ```
pub fn build_wiki_page_url(endpoints: &Endpoints, title: &str) -> String {
    format!("{}/page/html/{}", endpoints.wikipedia_rest, wiki_slug(title))
}

/// Builds the human-facing article URL for a title
pub fn build_wiki_article_url(title: &str) -> String {
    format!("https://en.wikipedia.org/wiki/{}", wiki_slug(title))
}

/// Builds a YouTube Data API search URL
///
/// Video searches use `"{exam} preparation"`, playlist searches
/// `"{exam} preparation playlist"`.
pub fn build_youtube_search_url(
    endpoints: &Endpoints,
    exam: &str,
    kind: YoutubeKind,
    max_results: usize,
    api_key: &str,
) -> String {
    let q = match kind {
        YoutubeKind::Video => format!("{} preparation", exam),
        YoutubeKind::Playlist => format!("{} preparation playlist", exam),
    };
    format!(
        "{}/search?part=snippet&q={}&maxResults={}&type={}&relevanceLanguage=en&key={}",
        endpoints.youtube_api,
        urlencoding::encode(&q),
        max_results,
        kind.as_str(),
        urlencoding::encode(api_key)
    )
}

/// Builds the watch URL for a YouTube video ID
pub fn build_video_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

/// Builds the URL for a YouTube playlist ID
pub fn build_playlist_url(playlist_id: &str) -> String {
    format!("https://www.youtube.com/playlist?list={}", playlist_id)
}

/// Builds the Google Books volumes search URL
///
/// # Example
/// ```
/// use examprep_core::url::{build_books_url, Endpoints};
/// let url = build_books_url(&Endpoints::default(), "CLAT", 6);
/// assert!(url.starts_with("https://www.googleapis.com/books/v1/volumes?q=CLAT%20preparation%20OR%20CLAT%20syllabus"));
/// assert!(url.ends_with("&maxResults=6"));
/// ```
pub fn build_books_url(endpoints: &Endpoints, exam: &str, max_results: usize) -> String {
    let q = format!("{0} preparation OR {0} syllabus OR {0} guide", exam);
    format!(
        "{}/volumes?q={}&maxResults={}",
        endpoints.books_api,
        urlencoding::encode(&q),
        max_results
    )
}

/// Resolves a scraped `href` against the page it was found on
///
/// Absolute links are returned unchanged. Returns `None` for links that
/// cannot be resolved or that use a non-HTTP scheme (`javascript:`, `mailto:`).
///
/// # Example
/// ```
/// use examprep_core::url::resolve_link;
/// let link = resolve_link("https://www.examsnet.com/exams/neet", "/pdf/neet-2023.pdf");
/// assert_eq!(link.as_deref(), Some("https://www.examsnet.com/pdf/neet-2023.pdf"));
/// ```
pub fn resolve_link(page_url: &str, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    let resolved = match Url::parse(href) {
        Ok(url) => url,
        Err(_) => Url::parse(page_url).ok()?.join(href).ok()?,
    };

    match resolved.scheme() {
        "http" | "https" => Some(resolved.to_string()),
        _ => None,
    }
}
