//! Exam Preparation Resource Scraper Core Library
//!
//! Aggregates preparation resources for Indian competitive exams
//! (NEET, JEE, UPSC, CUET, SSC CGL, CLAT, NTSE, ...) into one flat record
//! per exam, ready to be written out as JSON or CSV.
//!
//! # Overview
//!
//! For each exam query the scraper gathers:
//! - a Wikipedia overview with summary, syllabus and exam pattern
//! - video lectures and a playlist from the YouTube Data API (needs a key)
//! - book suggestions from Google Books
//! - free previous-year question paper links from Examsnet and Selfstudys
//!
//! All requests go through one rate-limited HTTP client with retries.
//! A failing source never aborts the record; it is listed in
//! [`ExamResources::failures`] instead.
//!
//! # Example
//!
//! ```no_run
//! use examprep_core::{ExamScraper, FetchOptions, OutputFormat, Result, write_records};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let scraper = ExamScraper::new()?;
//!
//!     let record = scraper.fetch_exam_info("JEE Main", FetchOptions::default()).await?;
//!     if let Some(syllabus) = &record.wikipedia.syllabus {
//!         println!("Syllabus: {}", syllabus);
//!     }
//!
//!     write_records(&[record], OutputFormat::Csv, std::io::stdout(), false)?;
//!     Ok(())
//! }
//! ```

mod client;
mod error;
pub mod export;
pub mod parser;
mod scraper;
pub mod sources;
mod types;
pub mod url;

// Re-export client types
pub use client::{ClientConfig, ExamClient, RateLimiter};

// Re-export error types
pub use error::{ExamPrepError, Result};

// Re-export output helpers
pub use export::{OutputFormat, ResourceRow, resource_rows, write_csv, write_json, write_records};

// Re-export main scraper API
pub use crate::scraper::{ExamScraper, FetchOptions, ScraperConfig};

// Re-export catalogs
pub use sources::{KNOWN_EXAMS, KnownExam, PyqSource, find_known_exam, pyq_sources};

// Re-export data types
pub use types::{
    BookSuggestion, ExamResources, PlaylistLink, PyqLink, Source, SourceFailure, VideoLink,
    WikiInfo, WikiSection,
};

// Re-export URL helpers
pub use url::Endpoints;
