//! Error taxonomy for the extraction pipeline
//!
//! Field-level absence is never an error; extractors fall back to defaults.
//! Only transport failures, a malformed reader payload, or a missing reader
//! payload reach these types.

/// Failure retrieving a page from the upstream site
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Upstream returned status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Browser session failed: {0}")]
    Browser(String),

    /// The page loaded but the expected selector never appeared
    #[error("Timeout waiting for: {0}")]
    WaitTimeout(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return FetchError::Timeout(e.to_string());
        }
        match e.status() {
            Some(status) => FetchError::Status {
                status: status.as_u16(),
                url: e.url().map(|u| u.to_string()).unwrap_or_default(),
            },
            None => FetchError::Network(e.to_string()),
        }
    }
}

/// Failure turning a parsed document into a record
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Malformed reader payload: {0}")]
    Parse(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// Coarse outcome used to pick the client-facing status and message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Fetch,
    Parse,
    NotFound,
}

impl ScrapeError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ScrapeError::Fetch(FetchError::WaitTimeout(_)) => FailureKind::NotFound,
            ScrapeError::Fetch(_) => FailureKind::Fetch,
            ScrapeError::Extract(ExtractError::Parse(_)) => FailureKind::Parse,
            ScrapeError::Extract(ExtractError::NotFound(_)) => FailureKind::NotFound,
        }
    }
}
