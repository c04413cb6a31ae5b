//! Previous-year question paper link parser
//!
//! Pulls paper links out of Examsnet and Selfstudys listing pages.

use scraper::{Html, Selector};

use crate::error::{ExamPrepError, Result};
use crate::parser::wikipedia::element_text;
use crate::sources::PyqSource;
use crate::types::PyqLink;
use crate::url::resolve_link;

/// Parses a PYQ listing page and returns up to `max` paper links
///
/// A link qualifies when its href mentions "pdf" or its text mentions
/// "previous" or "paper" (case-insensitive). Relative hrefs are resolved
/// against the page URL and repeated links are dropped.
///
/// # Errors
/// Returns `ParseError` if the link selector fails to compile
pub fn parse_pyq_links(html: &str, source: &PyqSource, max: usize) -> Result<Vec<PyqLink>> {
    let document = Html::parse_document(html);
    let link_selector = Selector::parse("a[href]")
        .map_err(|e| ExamPrepError::ParseError(format!("Invalid selector: {:?}", e)))?;

    let mut links: Vec<PyqLink> = Vec::new();

    for element in document.select(&link_selector) {
        if links.len() >= max {
            break;
        }

        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let text = element_text(&element);
        if !is_paper_link(href, &text) {
            continue;
        }

        let Some(link) = resolve_link(&source.url, href) else {
            continue;
        };
        if links.iter().any(|l| l.link == link) {
            continue;
        }

        links.push(PyqLink {
            site: source.site.to_string(),
            exam: source.exam.to_string(),
            title: text,
            link,
        });
    }

    Ok(links)
}

fn is_paper_link(href: &str, text: &str) -> bool {
    let text = text.to_lowercase();
    href.to_lowercase().contains("pdf") || text.contains("previous") || text.contains("paper")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> PyqSource {
        PyqSource {
            site: "Examsnet",
            exam: "NEET",
            url: "https://www.examsnet.com/exams/neet-chapterwise-previous-question-papers-online"
                .to_string(),
        }
    }

    #[test]
    fn test_parse_pyq_links_filters_and_resolves() {
        let html = r#"
        <html><body>
            <a href="/">Home</a>
            <a href="/test/neet-2023-physics">NEET 2023 Physics Previous Paper</a>
            <a href="https://cdn.examsnet.com/neet-2022.PDF">Download</a>
            <a href="/login">Login</a>
            <a href="javascript:void(0)">Previous page</a>
            <a href="/test/neet-2023-physics">duplicate paper link</a>
        </body></html>
        "#;

        let links = parse_pyq_links(html, &source(), 5).unwrap();
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].title, "NEET 2023 Physics Previous Paper");
        assert_eq!(
            links[0].link,
            "https://www.examsnet.com/test/neet-2023-physics"
        );
        assert_eq!(links[0].site, "Examsnet");
        assert_eq!(links[0].exam, "NEET");
        assert_eq!(links[1].link, "https://cdn.examsnet.com/neet-2022.PDF");
        assert_eq!(links[1].title, "Download");
    }

    #[test]
    fn test_parse_pyq_links_cap() {
        let html: String = (0..20)
            .map(|i| format!(r#"<a href="/p/{i}.pdf">Paper {i}</a>"#))
            .collect();
        let links = parse_pyq_links(&html, &source(), 5).unwrap();
        assert_eq!(links.len(), 5);
        assert_eq!(links[4].title, "Paper 4");
    }

    #[test]
    fn test_parse_pyq_links_none() {
        let links = parse_pyq_links("<p>No links here</p>", &source(), 5).unwrap();
        assert!(links.is_empty());
    }

    #[test]
    fn test_is_paper_link() {
        assert!(is_paper_link("/x/file.Pdf", ""));
        assert!(is_paper_link("/x", "PREVIOUS YEAR"));
        assert!(is_paper_link("/x", "Sample paper"));
        assert!(!is_paper_link("/about", "About us"));
    }
}
