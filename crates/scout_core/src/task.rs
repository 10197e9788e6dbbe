use std::fmt;

use thiserror::Error;
use url::Url;

/// Keywords used when a source does not name its own.
const DEFAULT_KEYWORDS: [&str; 2] = ["software", "engineer"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskError {
    #[error("invalid source url {url}: {message}")]
    InvalidUrl { url: String, message: String },
    #[error("unsupported scheme {scheme} in {url}")]
    UnsupportedScheme { url: String, scheme: String },
    #[error("empty selector for {url}")]
    EmptySelector { url: String },
}

/// Case-insensitive substring filter over a fixed keyword set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordFilter {
    keywords: Vec<String>,
}

impl KeywordFilter {
    /// Keywords are lower-cased once here; blank entries are dropped.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// True if any keyword occurs in `fragment`. An empty filter matches nothing.
    pub fn matches(&self, fragment: &str) -> bool {
        let lowered = fragment.to_lowercase();
        self.keywords.iter().any(|k| lowered.contains(k.as_str()))
    }
}

impl Default for KeywordFilter {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORDS)
    }
}

/// How a worker turns a fetched document into results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// Fragments under `selector` that contain one of the keywords.
    Keywords {
        selector: String,
        filter: KeywordFilter,
    },
    /// Every non-empty fragment under `selector`.
    AllFragments { selector: String },
}

impl Extraction {
    pub fn selector(&self) -> &str {
        match self {
            Extraction::Keywords { selector, .. } | Extraction::AllFragments { selector } => {
                selector
            }
        }
    }

    /// Filter predicate applied to each trimmed fragment.
    pub fn accepts(&self, fragment: &str) -> bool {
        if fragment.is_empty() {
            return false;
        }
        match self {
            Extraction::Keywords { filter, .. } => filter.matches(fragment),
            Extraction::AllFragments { .. } => true,
        }
    }
}

/// One source to scrape. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    source_url: String,
    extraction: Extraction,
}

impl Task {
    pub fn new(source_url: impl Into<String>, extraction: Extraction) -> Self {
        Self {
            source_url: source_url.into(),
            extraction,
        }
    }

    /// Shorthand for a task using [`Extraction::Keywords`].
    pub fn with_keywords(
        source_url: impl Into<String>,
        selector: impl Into<String>,
        filter: KeywordFilter,
    ) -> Self {
        Self::new(
            source_url,
            Extraction::Keywords {
                selector: selector.into(),
                filter,
            },
        )
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    pub fn selector(&self) -> &str {
        self.extraction.selector()
    }

    pub fn extraction(&self) -> &Extraction {
        &self.extraction
    }

    /// Startup check: the url must be absolute http(s) and the selector non-blank.
    pub fn check(&self) -> Result<(), TaskError> {
        let parsed = Url::parse(&self.source_url).map_err(|err| TaskError::InvalidUrl {
            url: self.source_url.clone(),
            message: err.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(TaskError::UnsupportedScheme {
                url: self.source_url.clone(),
                scheme: parsed.scheme().to_string(),
            });
        }
        if self.selector().trim().is_empty() {
            return Err(TaskError::EmptySelector {
                url: self.source_url.clone(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScrapeResult {
    pub title: String,
    pub source_url: String,
}

impl ScrapeResult {
    pub fn new(title: impl Into<String>, source_url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            source_url: source_url.into(),
        }
    }
}

impl fmt::Display for ScrapeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.source_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_is_case_insensitive() {
        let filter = KeywordFilter::new(["Software"]);
        assert!(filter.matches("Senior SOFTWARE Engineer"));
        assert!(!filter.matches("Product Manager"));
    }

    #[test]
    fn empty_filter_matches_nothing() {
        let filter = KeywordFilter::new(["", "   "]);
        assert!(filter.keywords().is_empty());
        assert!(!filter.matches("Software Engineer"));
    }

    #[test]
    fn all_fragments_skips_blank() {
        let extraction = Extraction::AllFragments {
            selector: "li".into(),
        };
        assert!(extraction.accepts("Designer"));
        assert!(!extraction.accepts(""));
    }

    #[test]
    fn check_rejects_non_http_scheme() {
        let task = Task::with_keywords("ftp://example.com/jobs", "li", KeywordFilter::default());
        assert_eq!(
            task.check(),
            Err(TaskError::UnsupportedScheme {
                url: "ftp://example.com/jobs".into(),
                scheme: "ftp".into(),
            })
        );
    }

    #[test]
    fn check_rejects_blank_selector() {
        let task = Task::with_keywords("https://example.com", "  ", KeywordFilter::default());
        assert!(matches!(task.check(), Err(TaskError::EmptySelector { .. })));
    }

    #[test]
    fn result_display_includes_source() {
        let result = ScrapeResult::new("Software Engineer", "https://example.com/careers");
        assert_eq!(
            result.to_string(),
            "Software Engineer (https://example.com/careers)"
        );
    }
}
