//! Per-source parsers
//!
//! HTML parsers for Wikipedia articles and PYQ listing pages, and JSON
//! parsers for the Wikipedia search, YouTube and Google Books APIs.

pub mod books;
pub mod pyq;
pub mod wikipedia;
pub mod youtube;

pub use books::parse_books;
pub use pyq::parse_pyq_links;
pub use wikipedia::{extract_wiki_sections, parse_wiki_search, select_wiki_info};
pub use youtube::{parse_youtube_playlist, parse_youtube_videos};
