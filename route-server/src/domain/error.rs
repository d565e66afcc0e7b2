//! Domain error types.
//!
//! These errors represent validation failures when raw leg records are
//! turned into domain values. They are distinct from search and I/O errors.

use super::{InvalidStationCode, TimeError};

/// Domain-level errors for validation of incoming leg data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A departure or arrival time is not valid "HH:MM"
    #[error("{field}: {source}")]
    InvalidTime {
        field: &'static str,
        #[source]
        source: TimeError,
    },

    /// An origin or destination code is malformed
    #[error("{field}: {source}")]
    InvalidStation {
        field: &'static str,
        #[source]
        source: InvalidStationCode,
    },

    /// A required text field is blank
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClockTime, StationCode};

    #[test]
    fn error_display() {
        let err = DomainError::MissingField("trainName");
        assert_eq!(err.to_string(), "missing required field: trainName");

        let source = ClockTime::parse_hhmm("7:00").unwrap_err();
        let err = DomainError::InvalidTime {
            field: "departureTime",
            source,
        };
        assert_eq!(
            err.to_string(),
            "departureTime: invalid time \"7:00\": expected HH:MM format"
        );

        let source = StationCode::parse("").unwrap_err();
        let err = DomainError::InvalidStation {
            field: "from",
            source,
        };
        assert_eq!(
            err.to_string(),
            "from: invalid station code \"\": must not be empty"
        );
    }
}
