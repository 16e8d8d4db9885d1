//! Backend error type shared by the PostgreSQL and in-memory backends

use std::sync::Arc;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(sqlx::Error),

    /// Connection establishment failed; the attempt is shared by every
    /// caller that waited on it
    #[error("database connection failed: {0}")]
    Connect(Arc<sqlx::Error>),

    /// Required connection setting missing
    #[error("{0} is not set")]
    Configuration(&'static str),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("unique constraint '{constraint}' violated")]
    UniqueViolation { constraint: String },

    #[error("foreign key constraint '{constraint}' violated")]
    ForeignKeyViolation { constraint: String },

    /// Stored row could not be mapped back to a model
    #[error("corrupt {resource} row: {reason}")]
    Decode { resource: &'static str, reason: String },
}

impl From<sqlx::Error> for DbError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            let constraint = db_err.constraint().unwrap_or_default().to_owned();
            if db_err.is_unique_violation() {
                return Self::UniqueViolation { constraint };
            }
            if db_err.is_foreign_key_violation() {
                return Self::ForeignKeyViolation { constraint };
            }
        }
        Self::Sqlx(e)
    }
}
