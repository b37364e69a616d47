//! Error types for tailpair-fetch

use tailpair_core::SourceError;
use thiserror::Error;

/// Errors that can occur while retrieving provider schedules
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP client could not be built
    #[error("HTTP client setup failed: {0}")]
    Client(String),

    /// Network or protocol failure
    #[error("HTTP error: {0}")]
    Http(String),

    /// Request exceeded the configured timeout
    #[error("request timed out")]
    Timeout,

    /// Provider answered with a non-success status
    #[error("provider returned HTTP {0}")]
    Status(u16),

    /// Response body was not JSON
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error (file-backed sources)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if let Some(status) = err.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Http(err.to_string())
        }
    }
}

impl From<FetchError> for SourceError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Timeout => SourceError::Timeout,
            FetchError::Status(status) => SourceError::Status { status },
            FetchError::Json(e) => SourceError::Document(e.to_string()),
            FetchError::Io(e) => SourceError::Io(e),
            FetchError::Client(msg) | FetchError::Http(msg) => SourceError::Request(msg),
        }
    }
}
