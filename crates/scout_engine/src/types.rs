use std::fmt;

/// A fetched document body and the declared content type used to decode it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    /// The HTTP client or request could not be built.
    Request,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    Cancelled,
    Network,
    Parse,
    Panicked,
}

impl FailureKind {
    /// Failures raised before any byte went over the wire.
    pub fn is_request_construction(&self) -> bool {
        matches!(self, FailureKind::InvalidUrl | FailureKind::Request)
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Request => write!(f, "request construction failed"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::Cancelled => write!(f, "cancelled"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Parse => write!(f, "parse error"),
            FailureKind::Panicked => write!(f, "worker panicked"),
        }
    }
}

/// A per-source failure, reported on the error stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeError {
    pub source_url: String,
    pub kind: FailureKind,
    pub message: String,
}

impl ScrapeError {
    pub fn new(source_url: impl Into<String>, kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
            kind,
            message: message.into(),
        }
    }

    pub fn from_fetch(source_url: impl Into<String>, err: FetchError) -> Self {
        Self::new(source_url, err.kind, err.message)
    }
}

impl fmt::Display for ScrapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let url = &self.source_url;
        match &self.kind {
            kind if kind.is_request_construction() => {
                write!(f, "failed to create request for {url}: {}", self.message)
            }
            FailureKind::HttpStatus(code) => {
                write!(f, "unexpected status code {code} for {url}")
            }
            FailureKind::Parse => {
                write!(f, "failed to parse document from {url}: {}", self.message)
            }
            FailureKind::Panicked => write!(f, "worker for {url} panicked"),
            kind => write!(f, "failed to fetch {url}: {kind}: {}", self.message),
        }
    }
}

impl std::error::Error for ScrapeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_names_code_and_url() {
        let err = ScrapeError::new(
            "https://example.com/jobs",
            FailureKind::HttpStatus(404),
            "404 Not Found",
        );
        assert_eq!(
            err.to_string(),
            "unexpected status code 404 for https://example.com/jobs"
        );
    }

    #[test]
    fn cancelled_error_reads_as_fetch_failure() {
        let err = ScrapeError::new("https://example.com", FailureKind::Cancelled, "deadline elapsed");
        assert_eq!(
            err.to_string(),
            "failed to fetch https://example.com: cancelled: deadline elapsed"
        );
    }

    #[test]
    fn invalid_url_reads_as_request_failure() {
        let err = ScrapeError::new("not a url", FailureKind::InvalidUrl, "relative URL without a base");
        assert!(err.to_string().starts_with("failed to create request for not a url"));
    }
}
