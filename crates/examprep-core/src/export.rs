//! JSON and CSV output
//!
//! JSON output is the list of records as-is. CSV output flattens every
//! record into one row per resource under a fixed header.

use serde::Serialize;
use std::fmt;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use crate::error::{ExamPrepError, Result};
use crate::types::ExamResources;
use crate::url::build_wiki_article_url;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

impl OutputFormat {
    /// Infers the format from a file extension (`.json` or `.csv`)
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

impl FromStr for OutputFormat {
    type Err = ExamPrepError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(ExamPrepError::ParseError(format!(
                "unknown output format '{}', expected json or csv",
                other
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => f.write_str("json"),
            OutputFormat::Csv => f.write_str("csv"),
        }
    }
}

/// One CSV row: a single resource belonging to a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceRow {
    pub query: String,
    pub kind: &'static str,
    pub title: String,
    pub url: String,
    pub detail: String,
}

/// Flattens records into CSV rows
///
/// Row kinds: `wikipedia`, `syllabus`, `pattern`, `video`, `playlist`,
/// `book`, `pyq`.
pub fn resource_rows(records: &[ExamResources]) -> Vec<ResourceRow> {
    let mut rows = Vec::new();

    for record in records {
        let row = |kind, title: String, url: String, detail: String| ResourceRow {
            query: record.query.clone(),
            kind,
            title,
            url,
            detail,
        };

        let wiki = &record.wikipedia;
        if let Some(title) = &wiki.title {
            rows.push(row(
                "wikipedia",
                title.clone(),
                build_wiki_article_url(title),
                wiki.summary.clone().unwrap_or_default(),
            ));
        }
        if let Some(syllabus) = &wiki.syllabus {
            rows.push(row("syllabus", "Syllabus".to_string(), String::new(), syllabus.clone()));
        }
        if let Some(pattern) = &wiki.pattern {
            rows.push(row("pattern", "Exam pattern".to_string(), String::new(), pattern.clone()));
        }

        for video in &record.videos {
            rows.push(row("video", video.title.clone(), video.url.clone(), String::new()));
        }
        if let Some(playlist) = &record.playlist {
            rows.push(row(
                "playlist",
                playlist.title.clone(),
                playlist.url.clone(),
                String::new(),
            ));
        }

        for book in &record.books {
            let mut detail = book.authors.join("; ");
            if let Some(publisher) = &book.publisher {
                if !detail.is_empty() {
                    detail.push_str(" | ");
                }
                detail.push_str(publisher);
            }
            rows.push(row(
                "book",
                book.title.clone().unwrap_or_default(),
                book.info_link.clone().unwrap_or_default(),
                detail,
            ));
        }

        for pyq in &record.free_pyqs {
            rows.push(row("pyq", pyq.title.clone(), pyq.link.clone(), pyq.site.clone()));
        }
    }

    rows
}

/// Writes records as a JSON array
pub fn write_json<W: Write>(records: &[ExamResources], mut writer: W, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, records)?;
    } else {
        serde_json::to_writer(&mut writer, records)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Writes records as CSV with a `query,kind,title,url,detail` header
///
/// The header is written even when there are no rows.
pub fn write_csv<W: Write>(records: &[ExamResources], writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(["query", "kind", "title", "url", "detail"])?;
    for row in resource_rows(records) {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes records in the requested format
///
/// `pretty` only affects JSON.
pub fn write_records<W: Write>(
    records: &[ExamResources],
    format: OutputFormat,
    writer: W,
    pretty: bool,
) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(records, writer, pretty),
        OutputFormat::Csv => write_csv(records, writer),
    }
}
