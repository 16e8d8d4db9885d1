//! Store-level error taxonomy
//!
//! Every failure a store operation can produce maps onto one variant, so
//! callers can tell "already booked" apart from a bad field or a dead
//! database.

use devevent_core::ValidationError;
use thiserror::Error;

use crate::db::DbError;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A required setting (the connection string) is missing
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Field-level or referential validation failed; nothing was written
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Uniqueness or dependency conflict
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    /// Transport or driver failure; safe to retry
    #[error("store error: {0}")]
    Backend(#[source] DbError),
}

impl From<DbError> for StoreError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::Configuration(var) => Self::Configuration(format!("{var} is not set")),
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            DbError::UniqueViolation { constraint } => Self::Conflict(conflict_reason(&constraint)),
            other => Self::Backend(other),
        }
    }
}

fn conflict_reason(constraint: &str) -> String {
    match constraint {
        crate::db::BOOKING_UNIQUE_CONSTRAINT => "this email has already booked the event".into(),
        crate::db::EVENT_SLUG_CONSTRAINT => "an event with this slug already exists".into(),
        other => format!("unique constraint '{other}' violated"),
    }
}
