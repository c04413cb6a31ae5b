//! Human-readable rendering of a record for the `show` command

use examprep_core::ExamResources;
use std::fmt;

const SUMMARY_CHARS: usize = 1000;
const SECTION_CHARS: usize = 1500;
const MAX_HEADINGS: usize = 15;

/// Cuts text to at most `max` characters
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Cuts text to at most `max` characters, marking the cut with "..."
pub fn excerpt(text: &str, max: usize) -> String {
    let cut = truncate_chars(text, max);
    if cut.len() < text.len() {
        format!("{} ...", cut)
    } else {
        cut.to_string()
    }
}

/// A record rendered the way `show` prints it
pub struct Summary<'a>(pub &'a ExamResources);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_summary(f, self.0)
    }
}

fn write_summary(out: &mut fmt::Formatter<'_>, record: &ExamResources) -> fmt::Result {
    writeln!(out, "=== Result Summary ===")?;
    writeln!(out)?;
    writeln!(out, "Query: {}", record.query)?;

    let wiki = &record.wikipedia;
    match &wiki.title {
        Some(title) => writeln!(out, "Wikipedia Page Title: {}", title)?,
        None => writeln!(out, "No matching Wikipedia article found.")?,
    }
    if let Some(summary) = &wiki.summary {
        writeln!(out, "\nSummary (lead):\n{}", excerpt(summary, SUMMARY_CHARS))?;
    }
    if let Some(pattern) = &wiki.pattern {
        writeln!(out, "\nExam Pattern / Format:\n{}", truncate_chars(pattern, SECTION_CHARS))?;
    }
    if let Some(syllabus) = &wiki.syllabus {
        writeln!(
            out,
            "\nSyllabus / Curriculum (excerpt):\n{}",
            truncate_chars(syllabus, SECTION_CHARS)
        )?;
    }
    if !wiki.other_sections.is_empty() {
        writeln!(out, "\nOther sections found on Wikipedia (headings):")?;
        for section in wiki.other_sections.iter().take(MAX_HEADINGS) {
            writeln!(out, " - {}", section.heading)?;
        }
    }

    if record.videos.is_empty() {
        writeln!(out, "\nYouTube results not available (no API key or no results).")?;
    } else {
        writeln!(out, "\nSuggested Videos:")?;
        for video in &record.videos {
            writeln!(out, " - {}  ({})", video.title, video.url)?;
        }
    }

    match &record.playlist {
        Some(playlist) => writeln!(
            out,
            "\nSuggested YouTube Playlist:\n - {} ({})",
            playlist.title, playlist.url
        )?,
        None => writeln!(out, "\nYouTube playlist not available (no API key or no results).")?,
    }

    if record.books.is_empty() {
        writeln!(out, "\nNo book suggestions found.")?;
    } else {
        writeln!(out, "\nSuggested Books:")?;
        for book in &record.books {
            writeln!(
                out,
                " - {} | {} - {}",
                book.title.as_deref().unwrap_or("Untitled"),
                book.authors.join(", "),
                book.info_link.as_deref().unwrap_or("no link")
            )?;
        }
    }

    if record.free_pyqs.is_empty() {
        writeln!(out, "\nNo free PYQs links found.")?;
    } else {
        writeln!(out, "\nFree Solved PYQs Links (Examsnet / Selfstudys):")?;
        for pyq in &record.free_pyqs {
            let title = if pyq.title.is_empty() { &pyq.exam } else { &pyq.title };
            writeln!(out, " - {} | {}: {}", title, pyq.site, pyq.link)?;
        }
    }

    if !record.failures.is_empty() {
        writeln!(out, "\nSources that failed:")?;
        for failure in &record.failures {
            writeln!(out, " - {}: {}", failure.source, failure.message)?;
        }
    }

    writeln!(out, "\n--- End ---")
}

#[cfg(test)]
mod tests {
    use super::*;
    use examprep_core::{PyqLink, Source, SourceFailure, WikiInfo, WikiSection};

    #[test]
    fn test_excerpt() {
        assert_eq!(excerpt("short", 10), "short");
        assert_eq!(excerpt("abcdef", 3), "abc ...");
        // multi-byte characters are not split
        assert_eq!(excerpt("परीक्षा", 2), "पर ...");
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("abc", 3), "abc");
    }

    #[test]
    fn test_render_empty_record() {
        let text = Summary(&ExamResources::new("GATE")).to_string();
        assert!(text.contains("Query: GATE"));
        assert!(text.contains("No matching Wikipedia article found."));
        assert!(text.contains("No book suggestions found."));
        assert!(text.contains("No free PYQs links found."));
        assert!(text.ends_with("--- End ---\n"));
    }

    #[test]
    fn test_render_full_record() {
        let mut record = ExamResources::new("NEET");
        record.wikipedia = WikiInfo {
            title: Some("NEET".to_string()),
            summary: Some("x".repeat(1200)),
            syllabus: None,
            pattern: Some("p".repeat(1600)),
            other_sections: (0..20)
                .map(|i| WikiSection {
                    heading: format!("section {i}"),
                    text: "t".to_string(),
                })
                .collect(),
        };
        record.free_pyqs.push(PyqLink {
            site: "Examsnet".to_string(),
            exam: "NEET".to_string(),
            title: String::new(),
            link: "https://www.examsnet.com/p".to_string(),
        });
        record.failures.push(SourceFailure {
            source: Source::GoogleBooks,
            message: "Rate limited - too many requests".to_string(),
        });

        let text = Summary(&record).to_string();
        assert!(text.contains(&format!("{} ...", "x".repeat(1000))));
        // pattern is cut without a marker
        assert!(text.contains(&format!("{}\n", "p".repeat(1500))));
        assert!(!text.contains(&"p".repeat(1501)));
        assert!(text.contains(" - section 14\n"));
        assert!(!text.contains(" - section 15\n"));
        assert!(text.contains(" - NEET | Examsnet: https://www.examsnet.com/p"));
        assert!(text.contains(" - google_books: Rate limited"));
    }
}
