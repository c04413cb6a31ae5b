//! Wikipedia parsers
//!
//! Parses the MediaWiki search response and the article HTML served by the
//! REST API, then picks the summary, syllabus and exam-pattern sections.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;
use std::sync::LazyLock;

use crate::error::{ExamPrepError, Result};
use crate::types::{WikiInfo, WikiSection};

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex is valid"));

const HEADINGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];
const CONTENT_TAGS: [&str; 4] = ["p", "ul", "ol", "div"];

const SYLLABUS_KEYS: [&str; 5] = [
    "syllabus",
    "curriculum",
    "exam syllabus",
    "syllabus and exam pattern",
    "syllabus and structure",
];
const SYLLABUS_WORDS: [&str; 5] = ["syllabus", "curriculum", "subjects", "paper", "exam"];
const PATTERN_KEYS: [&str; 5] = ["exam pattern", "pattern", "format", "structure", "scheme"];
const PATTERN_WORDS: [&str; 5] = ["pattern", "structure", "format", "scheme", "paper"];

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    query: Option<SearchQuery>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
}

/// Parses a MediaWiki `list=search` response and returns the best title
///
/// # Returns
/// Title of the first hit, `None` when the search found nothing
///
/// # Errors
/// Returns `JsonError` if the body is not valid JSON
pub fn parse_wiki_search(json: &str) -> Result<Option<String>> {
    let response: SearchResponse = serde_json::from_str(json)?;
    Ok(response
        .query
        .and_then(|q| q.search.into_iter().next())
        .map(|hit| hit.title))
}

/// Extracts headed sections from article HTML
///
/// Table content is ignored entirely. Each h1-h6 heading collects the text
/// of the `p`, `ul`, `ol` and `div` siblings that follow it, up to the next
/// heading. Headings are lower-cased; a repeated heading replaces the earlier
/// text in place. A `summary` section holding the lead paragraph is appended
/// when the article has no section of that name.
///
/// # Errors
/// Returns `ParseError` if a selector fails to compile
pub fn extract_wiki_sections(html: &str) -> Result<Vec<WikiSection>> {
    let document = Html::parse_document(html);
    let heading_selector = selector(&HEADINGS.join(", "))?;
    let paragraph_selector = selector("p")?;

    let mut sections: Vec<WikiSection> = Vec::new();

    for heading in document.select(&heading_selector) {
        if inside_table(&heading) {
            continue;
        }

        let heading_text = element_text(&heading).to_lowercase();
        let parts = section_body(&heading);
        if parts.is_empty() {
            continue;
        }

        upsert(&mut sections, heading_text, parts.join("\n\n"));
    }

    if !sections.iter().any(|s| s.heading == "summary") {
        let lead = document
            .select(&paragraph_selector)
            .find(|p| !inside_table(p))
            .map(|p| element_text(&p))
            .unwrap_or_default();
        if !lead.is_empty() {
            sections.push(WikiSection {
                heading: "summary".to_string(),
                text: lead,
            });
        }
    }

    Ok(sections)
}

/// Picks summary, syllabus and pattern out of extracted sections
///
/// Exact heading names are preferred; otherwise the first heading that
/// mentions a related word is used.
pub fn select_wiki_info(title: Option<String>, sections: Vec<WikiSection>) -> WikiInfo {
    let lookup = |key: &str| {
        sections
            .iter()
            .find(|s| s.heading == key)
            .map(|s| s.text.clone())
    };
    let fuzzy = |words: &[&str]| {
        sections
            .iter()
            .find(|s| words.iter().any(|w| s.heading.contains(w)))
            .map(|s| s.text.clone())
    };

    let summary = lookup("summary").or_else(|| lookup("introduction"));
    let syllabus = SYLLABUS_KEYS
        .iter()
        .find_map(|&k| lookup(k))
        .or_else(|| fuzzy(&SYLLABUS_WORDS[..]));
    let pattern = PATTERN_KEYS
        .iter()
        .find_map(|&k| lookup(k))
        .or_else(|| fuzzy(&PATTERN_WORDS[..]));

    WikiInfo {
        title,
        summary: summary.filter(|s| !s.is_empty()),
        syllabus,
        pattern,
        other_sections: sections,
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| ExamPrepError::ParseError(format!("Invalid selector: {:?}", e)))
}

fn upsert(sections: &mut Vec<WikiSection>, heading: String, text: String) {
    match sections.iter_mut().find(|s| s.heading == heading) {
        Some(existing) => existing.text = text,
        None => sections.push(WikiSection { heading, text }),
    }
}

/// Collects the text blocks belonging to a heading
///
/// Newer MediaWiki output wraps headings in `<div class="mw-heading">`,
/// in which case the wrapper's siblings hold the content.
fn section_body(heading: &ElementRef) -> Vec<String> {
    let anchor = heading
        .parent()
        .and_then(ElementRef::wrap)
        .filter(is_heading_wrapper)
        .unwrap_or(*heading);

    let mut parts = Vec::new();
    for sibling in anchor.next_siblings().filter_map(ElementRef::wrap) {
        let name = sibling.value().name();
        if HEADINGS.contains(&name) || is_heading_wrapper(&sibling) {
            break;
        }
        if CONTENT_TAGS.contains(&name) {
            let text = element_text(&sibling);
            if !text.is_empty() {
                parts.push(text);
            }
        }
    }
    parts
}

fn is_heading_wrapper(element: &ElementRef) -> bool {
    element.value().name() == "div" && element.value().classes().any(|c| c == "mw-heading")
}

fn inside_table(element: &ElementRef) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|a| a.value().name() == "table")
}

/// Text of an element with tables skipped and whitespace collapsed
pub(crate) fn element_text(element: &ElementRef) -> String {
    let mut parts = Vec::new();
    push_text(element, &mut parts);
    normalize_whitespace(&parts.join(" "))
}

fn push_text(element: &ElementRef, parts: &mut Vec<String>) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            let text: &str = text;
            parts.push(text.to_string());
        } else if let Some(child_element) = ElementRef::wrap(child)
            && child_element.value().name() != "table"
        {
            push_text(&child_element, parts);
        }
    }
}

/// Collapses runs of whitespace into single spaces and trims the ends
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ARTICLE: &str = r#"
    <html><body>
      <section>
        <p>The <b>National Eligibility cum Entrance Test</b> is an entrance exam.</p>
        <table class="infobox"><tr><th><h3>Acronym</h3></th><td>NEET</td></tr></table>
      </section>
      <section>
        <h2>History</h2>
        <p>Introduced in 2013.</p>
        <table><tr><td>Year</td><td>Candidates</td></tr></table>
        <p>Made mandatory in 2016.</p>
      </section>
      <section>
        <h2>Exam Pattern</h2>
        <ul><li>180 questions</li><li>720 marks</li></ul>
      </section>
      <section>
        <h2>Syllabus</h2>
        <div>Physics, Chemistry
            and Biology</div>
      </section>
      <section>
        <h2>See also</h2>
      </section>
    </body></html>
    "#;

    #[test]
    fn test_parse_wiki_search_first_title() {
        let json = r#"{"query":{"search":[{"title":"NEET"},{"title":"NEET-PG"}]}}"#;
        assert_eq!(parse_wiki_search(json).unwrap(), Some("NEET".to_string()));
    }

    #[test]
    fn test_parse_wiki_search_no_hits() {
        assert_eq!(parse_wiki_search(r#"{"query":{"search":[]}}"#).unwrap(), None);
        assert_eq!(parse_wiki_search(r#"{"batchcomplete":""}"#).unwrap(), None);
    }

    #[test]
    fn test_parse_wiki_search_invalid_json() {
        assert!(matches!(
            parse_wiki_search("<html>"),
            Err(ExamPrepError::JsonError(_))
        ));
    }

    #[test]
    fn test_extract_sections_in_order_without_tables() {
        let sections = extract_wiki_sections(ARTICLE).unwrap();
        let headings: Vec<&str> = sections.iter().map(|s| s.heading.as_str()).collect();
        assert_eq!(headings, vec!["history", "exam pattern", "syllabus", "summary"]);

        assert_eq!(
            sections[0].text,
            "Introduced in 2013.\n\nMade mandatory in 2016."
        );
        assert_eq!(sections[1].text, "180 questions 720 marks");
        assert_eq!(sections[2].text, "Physics, Chemistry and Biology");
        assert_eq!(
            sections[3].text,
            "The National Eligibility cum Entrance Test is an entrance exam."
        );
    }

    #[test]
    fn test_heading_inside_table_ignored() {
        let sections = extract_wiki_sections(ARTICLE).unwrap();
        assert!(sections.iter().all(|s| s.heading != "acronym"));
    }

    #[test]
    fn test_repeated_heading_keeps_position() {
        let html = r#"
            <div><h2>Notes</h2><p>first</p><h2>Format</h2><p>two papers</p><h2>Notes</h2><p>second</p></div>
        "#;
        let sections = extract_wiki_sections(html).unwrap();
        assert_eq!(sections[0].heading, "notes");
        assert_eq!(sections[0].text, "second");
        assert_eq!(sections[1].heading, "format");
    }

    #[test]
    fn test_mw_heading_wrapper() {
        let html = r#"
            <div class="mw-heading mw-heading2"><h2>Eligibility</h2></div>
            <p>Class 12 pass.</p>
            <div class="mw-heading mw-heading2"><h2>Scheme</h2></div>
            <p>Two tiers.</p>
        "#;
        let sections = extract_wiki_sections(html).unwrap();
        assert_eq!(sections[0].heading, "eligibility");
        assert_eq!(sections[0].text, "Class 12 pass.");
        assert_eq!(sections[1].heading, "scheme");
        assert_eq!(sections[1].text, "Two tiers.");
    }

    #[test]
    fn test_existing_summary_heading_not_overwritten() {
        let html = "<div><p>Lead text.</p><h2>Summary</h2><p>Real summary.</p></div>";
        let sections = extract_wiki_sections(html).unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].text, "Real summary.");
    }

    #[test]
    fn test_select_wiki_info_exact_keys() {
        let sections = extract_wiki_sections(ARTICLE).unwrap();
        let info = select_wiki_info(Some("NEET".to_string()), sections);
        assert_eq!(info.title.as_deref(), Some("NEET"));
        assert_eq!(info.syllabus.as_deref(), Some("Physics, Chemistry and Biology"));
        assert_eq!(info.pattern.as_deref(), Some("180 questions 720 marks"));
        assert!(info.summary.unwrap().starts_with("The National Eligibility"));
        assert_eq!(info.other_sections.len(), 4);
    }

    #[test]
    fn test_select_wiki_info_fuzzy_fallback() {
        let sections = vec![
            WikiSection {
                heading: "introduction".to_string(),
                text: "Intro".to_string(),
            },
            WikiSection {
                heading: "subjects covered".to_string(),
                text: "Legal aptitude".to_string(),
            },
            WikiSection {
                heading: "question paper".to_string(),
                text: "150 MCQs".to_string(),
            },
        ];
        let info = select_wiki_info(None, sections);
        assert_eq!(info.summary.as_deref(), Some("Intro"));
        assert_eq!(info.syllabus.as_deref(), Some("Legal aptitude"));
        assert_eq!(info.pattern.as_deref(), Some("150 MCQs"));
    }

    #[test]
    fn test_select_wiki_info_nothing_relevant() {
        let sections = vec![WikiSection {
            heading: "history".to_string(),
            text: "Old".to_string(),
        }];
        let info = select_wiki_info(Some("X".to_string()), sections);
        assert_eq!(info.summary, None);
        assert_eq!(info.syllabus, None);
        assert_eq!(info.pattern, None);
    }

    proptest! {
        #[test]
        fn prop_normalized_text_has_no_double_spaces(text in "[ a-zA-Z\t\n]{0,60}") {
            let out = normalize_whitespace(&text);
            prop_assert!(!out.contains("  "));
            prop_assert!(!out.starts_with(' '));
            prop_assert!(!out.ends_with(' '));
            prop_assert!(!out.contains('\n'));
        }
    }
}
