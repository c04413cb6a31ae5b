//! Fixed source catalogs
//!
//! Lists the exams the tool knows by name and the pages that host free
//! previous-year question papers for them.

use crate::url::Endpoints;

/// A competitive exam the tool knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownExam {
    /// Query used when scraping (e.g., "SSC CGL")
    pub name: &'static str,
    pub description: &'static str,
}

/// Exams offered by `--all-known` and the `exams` listing
pub const KNOWN_EXAMS: &[KnownExam] = &[
    KnownExam {
        name: "NEET",
        description: "National Eligibility cum Entrance Test (medical)",
    },
    KnownExam {
        name: "JEE Main",
        description: "Joint Entrance Examination (engineering)",
    },
    KnownExam {
        name: "UPSC",
        description: "Union Public Service Commission civil services",
    },
    KnownExam {
        name: "CUET",
        description: "Common University Entrance Test",
    },
    KnownExam {
        name: "SSC CGL",
        description: "Staff Selection Commission Combined Graduate Level",
    },
    KnownExam {
        name: "CLAT",
        description: "Common Law Admission Test",
    },
    KnownExam {
        name: "NTSE",
        description: "National Talent Search Examination",
    },
];

/// A page listing previous-year question papers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PyqSource {
    /// Site name shown to users (e.g., "Selfstudys")
    pub site: &'static str,
    /// Exam label attached to links from this page
    pub exam: &'static str,
    /// Absolute page URL
    pub url: String,
}

/// Returns the PYQ pages to scrape for an exam query
///
/// Matching is case-insensitive on the query text. NEET takes precedence
/// over JEE; any other exam has no PYQ pages.
///
/// # Example
/// ```
/// use examprep_core::sources::pyq_sources;
/// use examprep_core::url::Endpoints;
/// let sources = pyq_sources("jee main 2025", &Endpoints::default());
/// assert_eq!(sources.len(), 2);
/// assert_eq!(sources[0].exam, "JEE Mains");
/// assert!(pyq_sources("CLAT", &Endpoints::default()).is_empty());
/// ```
pub fn pyq_sources(exam_query: &str, endpoints: &Endpoints) -> Vec<PyqSource> {
    let query = exam_query.to_lowercase();

    let (exam, examsnet_path, selfstudys_path) = if query.contains("neet") {
        (
            "NEET",
            "/exams/neet-chapterwise-previous-question-papers-online",
            "/books/neet-previous-year-paper/page/year-wise",
        )
    } else if query.contains("jee") {
        (
            "JEE Mains",
            "/exams/jee-mains-chapterwise-previous-year-questions-online",
            "/books/jee-main-previous-year-paper/page/year-wise",
        )
    } else {
        return Vec::new();
    };

    vec![
        PyqSource {
            site: "Examsnet",
            exam,
            url: format!("{}{}", endpoints.examsnet.trim_end_matches('/'), examsnet_path),
        },
        PyqSource {
            site: "Selfstudys",
            exam,
            url: format!(
                "{}{}",
                endpoints.selfstudys.trim_end_matches('/'),
                selfstudys_path
            ),
        },
    ]
}

/// Finds a known exam by case-insensitive name
pub fn find_known_exam(name: &str) -> Option<&'static KnownExam> {
    let name = name.trim();
    KNOWN_EXAMS.iter().find(|e| e.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neet_sources() {
        let sources = pyq_sources("NEET UG", &Endpoints::default());
        assert_eq!(
            sources,
            vec![
                PyqSource {
                    site: "Examsnet",
                    exam: "NEET",
                    url: "https://www.examsnet.com/exams/neet-chapterwise-previous-question-papers-online".to_string(),
                },
                PyqSource {
                    site: "Selfstudys",
                    exam: "NEET",
                    url: "https://www.selfstudys.com/books/neet-previous-year-paper/page/year-wise".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_neet_wins_over_jee() {
        let sources = pyq_sources("neet or jee", &Endpoints::default());
        assert!(sources.iter().all(|s| s.exam == "NEET"));
    }

    #[test]
    fn test_unknown_exam_has_no_sources() {
        assert!(pyq_sources("UPSC", &Endpoints::default()).is_empty());
        assert!(pyq_sources("", &Endpoints::default()).is_empty());
    }

    #[test]
    fn test_sources_follow_endpoints() {
        let endpoints = Endpoints::with_base("http://127.0.0.1:1234");
        let sources = pyq_sources("JEE", &endpoints);
        assert_eq!(
            sources[1].url,
            "http://127.0.0.1:1234/selfstudys/books/jee-main-previous-year-paper/page/year-wise"
        );
    }

    #[test]
    fn test_find_known_exam() {
        assert_eq!(find_known_exam("ssc cgl").map(|e| e.name), Some("SSC CGL"));
        assert!(find_known_exam("GATE").is_none());
        assert_eq!(KNOWN_EXAMS.len(), 7);
    }
}
