//! Bookings and email validation

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ValidationError;

/// RFC 5322 style address check (local part, then dot-separated labels)
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("invalid email regex")
});

/// Trimmed, lowercased and validated email address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Create an email address, normalizing case and surrounding whitespace.
    ///
    /// # Example
    /// ```
    /// use devevent_core::Email;
    ///
    /// assert_eq!(Email::new("  Ana@Example.COM ").unwrap().as_str(), "ana@example.com");
    /// assert!(Email::new("not an email").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let normalized = s.trim().to_lowercase();

        if normalized.is_empty() {
            return Err(ValidationError::Empty { field: "email" });
        }

        if !EMAIL_RE.is_match(&normalized) {
            return Err(ValidationError::InvalidFormat {
                field: "email",
                reason: "must be a valid email address",
            });
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Stored booking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub event_id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Booking request as submitted
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BookingDraft {
    #[serde(alias = "eventId")]
    pub event_id: String,
    pub email: String,
}

/// Partial edit of a stored booking
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BookingPatch {
    #[serde(alias = "eventId")]
    pub event_id: Option<String>,
    pub email: Option<String>,
}

/// Booking fields that passed validation and the event reference check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub event_id: Uuid,
    pub email: Email,
}
