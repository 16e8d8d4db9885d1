//! Booking integrity guard
//!
//! A booking may only point at an event that exists when the booking is
//! written. The guard checks this with an identity-only lookup and never
//! creates or repairs the reference.

use devevent_core::ValidationError;
use uuid::Uuid;

use super::EventBackend;
use crate::db::DbError;
use crate::error::StoreError;

/// Resolve a raw event reference to the id of a stored event.
///
/// A missing event and an unusable reference are both validation errors;
/// only a missing connection setting escapes as a configuration error.
pub async fn check_event_reference(
    events: &dyn EventBackend,
    raw_event_id: &str,
) -> Result<Uuid, StoreError> {
    let raw = raw_event_id.trim();
    if raw.is_empty() {
        return Err(ValidationError::Empty { field: "eventId" }.into());
    }

    let Ok(event_id) = Uuid::parse_str(raw) else {
        tracing::debug!(event_ref = raw, "booking rejected: malformed event id");
        return Err(ValidationError::InvalidEventReference.into());
    };

    match events.event_exists(event_id).await {
        Ok(true) => Ok(event_id),
        Ok(false) => {
            tracing::info!(%event_id, "booking rejected: referenced event does not exist");
            Err(ValidationError::EventNotFound { event_id }.into())
        }
        Err(err @ DbError::Configuration(_)) => Err(err.into()),
        Err(err) => {
            tracing::warn!(%event_id, error = %err, "event reference lookup failed");
            Err(ValidationError::InvalidEventReference.into())
        }
    }
}
