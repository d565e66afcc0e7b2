//! Timetable error types.

use crate::domain::DomainError;

/// Errors that can occur when loading or updating the timetable.
#[derive(Debug, thiserror::Error)]
pub enum TimetableError {
    /// Seed file could not be read
    #[error("failed to read timetable file: {0}")]
    Io(#[from] std::io::Error),

    /// Seed file is not a JSON array of leg records
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A single submitted record failed validation
    #[error("invalid leg record: {0}")]
    Invalid(#[from] DomainError),

    /// A record in a seed file failed validation
    #[error("invalid leg record at index {index}: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: DomainError,
    },
}
