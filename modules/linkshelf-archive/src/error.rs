use thiserror::Error;

/// Result type alias for fetch operations.
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Failures of a single HTTP exchange. Extraction strategies never return
/// these to callers; they log them and degrade.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ArchiveError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ArchiveError::Timeout(err.to_string())
        } else {
            ArchiveError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ArchiveError {
    fn from(err: serde_json::Error) -> Self {
        ArchiveError::Parse(err.to_string())
    }
}
