//! Error types for the exam resource scraper
//!
//! Provides a single error enum with human-readable messages.
//! Errors serialize as their display string so that per-source
//! failures can be embedded in exported records.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for all scraper operations
#[derive(Error, Debug)]
pub enum ExamPrepError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Response body was not the JSON we expected
    #[error("Invalid JSON response: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Writing CSV output failed
    #[error("CSV output failed: {0}")]
    CsvError(#[from] csv::Error),

    /// Reading or writing a file failed
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse input (selectors, format names)
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Empty or otherwise unusable exam query
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Rate limited by server (HTTP 429)
    #[error("Rate limited - too many requests")]
    RateLimited,

    /// Page not found on server
    #[error("Not found: {0}")]
    NotFound(String),

    /// Server answered with an unexpected status code
    #[error("Unexpected HTTP status {status} for {url}")]
    Status { status: u16, url: String },

    /// An API that needs a key was called without one
    #[error("Missing API key for {0}")]
    MissingApiKey(String),
}

impl Serialize for ExamPrepError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for scraper operations
pub type Result<T> = std::result::Result<T, ExamPrepError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_parse_error() {
        let error = ExamPrepError::ParseError("missing element".to_string());
        assert_eq!(error.to_string(), "Parse error: missing element");
    }

    #[test]
    fn test_error_display_invalid_query() {
        let error = ExamPrepError::InvalidQuery("query cannot be empty".to_string());
        assert_eq!(error.to_string(), "Invalid query: query cannot be empty");
    }

    #[test]
    fn test_error_display_rate_limited() {
        let error = ExamPrepError::RateLimited;
        assert_eq!(error.to_string(), "Rate limited - too many requests");
    }

    #[test]
    fn test_error_display_status() {
        let error = ExamPrepError::Status {
            status: 403,
            url: "https://www.examsnet.com/exams".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Unexpected HTTP status 403 for https://www.examsnet.com/exams"
        );
    }

    #[test]
    fn test_error_display_missing_api_key() {
        let error = ExamPrepError::MissingApiKey("YouTube".to_string());
        assert_eq!(error.to_string(), "Missing API key for YouTube");
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let error: ExamPrepError = json_err.into();
        assert!(error.to_string().starts_with("Invalid JSON response"));
    }

    #[test]
    fn test_error_serialize() {
        let error = ExamPrepError::RateLimited;
        let json = serde_json::to_string(&error).expect("Serialization should succeed");
        assert_eq!(json, "\"Rate limited - too many requests\"");
    }

    #[test]
    fn test_error_serialize_with_message() {
        let error = ExamPrepError::NotFound("https://en.wikipedia.org/x".to_string());
        let json = serde_json::to_string(&error).expect("Serialization should succeed");
        assert_eq!(json, "\"Not found: https://en.wikipedia.org/x\"");
    }
}
