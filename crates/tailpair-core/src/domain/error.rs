//! Error taxonomy for tailpair.

/// Why a single provider flight object did not become a [`LegRecord`].
///
/// [`LegRecord`]: super::LegRecord
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("flight operated by {code:?}, not the home airline")]
    ForeignAirline { code: String },

    #[error("malformed flight record: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl ExtractionError {
    /// Foreign-airline rejections are expected filtering, not data loss.
    pub fn is_malformed(&self) -> bool {
        matches!(self, ExtractionError::Malformed(_))
    }
}

/// Failure to retrieve one direction of the schedule.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("provider returned HTTP {status}")]
    Status { status: u16 },

    #[error("request timed out")]
    Timeout,

    #[error("invalid provider document: {0}")]
    Document(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure to serialise the schedule for export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("export is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Result type for schedule retrieval.
pub type SourceResult<T> = std::result::Result<T, SourceError>;
