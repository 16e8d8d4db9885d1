//! Validation error types

use thiserror::Error;
use uuid::Uuid;

/// Field-level or referential validation failure.
///
/// A write that produces one of these is aborted before anything is stored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// Field exceeds maximum length
    #[error("{field} exceeds maximum length of {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// String doesn't match required format
    #[error("{field}: {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },

    /// Invalid enum variant
    #[error("invalid {field} value: '{value}'")]
    InvalidVariant { field: &'static str, value: String },

    /// List field has no usable entries
    #[error("{field} requires at least one entry")]
    EmptyList { field: &'static str },

    #[error("invalid date format")]
    InvalidDate,

    #[error("invalid time format")]
    InvalidTimeFormat,

    #[error("invalid time value")]
    InvalidTimeValue,

    /// Booking points at an event id that is not stored
    #[error("referenced event does not exist")]
    EventNotFound { event_id: Uuid },

    /// Event reference could not be checked (malformed id or lookup failure)
    #[error("invalid event reference or store error")]
    InvalidEventReference,
}

impl ValidationError {
    /// Name of the offending field, when the error is tied to one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Empty { field }
            | Self::TooLong { field, .. }
            | Self::InvalidFormat { field, .. }
            | Self::InvalidVariant { field, .. }
            | Self::EmptyList { field } => Some(field),
            Self::InvalidDate => Some("date"),
            Self::InvalidTimeFormat | Self::InvalidTimeValue => Some("time"),
            Self::EventNotFound { .. } | Self::InvalidEventReference => Some("eventId"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "title",
            max: 100,
        };
        assert_eq!(
            err.to_string(),
            "title exceeds maximum length of 100 characters"
        );
    }

    #[test]
    fn normalization_messages() {
        assert_eq!(ValidationError::InvalidDate.to_string(), "invalid date format");
        assert_eq!(ValidationError::InvalidTimeFormat.to_string(), "invalid time format");
        assert_eq!(ValidationError::InvalidTimeValue.to_string(), "invalid time value");
    }

    #[test]
    fn reference_messages() {
        let missing = ValidationError::EventNotFound {
            event_id: Uuid::nil(),
        };
        assert_eq!(missing.to_string(), "referenced event does not exist");
        assert_eq!(
            ValidationError::InvalidEventReference.to_string(),
            "invalid event reference or store error"
        );
        assert_eq!(missing.field(), Some("eventId"));
    }
}
