//! # Error Types — Structured Error Hierarchy
//!
//! Defines the cross-cutting error type for the facility. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//! Each state machine crate carries its own narrower error enum; those
//! convert into [`FacilityError`] at the session boundary.
//!
//! ## Design
//!
//! - Transition errors include the current state and the attempted target.
//! - Lookup errors name the identifier that was not found.
//! - Fixture and configuration errors carry the parser message verbatim.

use thiserror::Error;

/// Top-level error type for the facility.
#[derive(Error, Debug)]
pub enum FacilityError {
    /// State machine transition rejected.
    #[error("invalid state transition: {0}")]
    InvalidTransition(String),

    /// A referenced locker, parcel, or member does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Input failed a boundary check (empty name, negative quantity, ...).
    #[error("validation error: {0}")]
    Validation(String),

    /// Seed fixture document is malformed or violates a model invariant.
    #[error("fixture error: {0}")]
    Fixture(String),

    /// Configuration document is malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error raised while parsing a timestamp from text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid timestamp {input:?}: {reason}")]
pub struct TimestampError {
    /// The rejected input.
    pub input: String,
    /// Why it was rejected.
    pub reason: String,
}

impl From<TimestampError> for FacilityError {
    fn from(err: TimestampError) -> Self {
        FacilityError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_context() {
        let err = FacilityError::NotFound("parcel AMZ-834J".to_string());
        assert_eq!(err.to_string(), "not found: parcel AMZ-834J");
    }

    #[test]
    fn test_timestamp_error_converts_to_validation() {
        let err = TimestampError {
            input: "yesterday".to_string(),
            reason: "unrecognised format".to_string(),
        };
        let facility: FacilityError = err.into();
        assert!(matches!(facility, FacilityError::Validation(msg) if msg.contains("yesterday")));
    }

    #[test]
    fn test_io_error_from() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "seed.yaml");
        let err: FacilityError = io.into();
        assert!(err.to_string().starts_with("io error"));
    }
}
