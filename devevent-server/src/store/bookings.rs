//! Booking store

use std::sync::Arc;

use devevent_core::{Booking, BookingDraft, BookingPatch, Email, NewBooking, ValidationError};
use uuid::Uuid;

use super::guard::check_event_reference;
use super::{BookingBackend, EventBackend};
use crate::db::DbError;
use crate::error::{StoreError, StoreResult};

#[derive(Clone)]
pub struct BookingStore {
    events: Arc<dyn EventBackend>,
    bookings: Arc<dyn BookingBackend>,
}

impl BookingStore {
    pub fn new(events: Arc<dyn EventBackend>, bookings: Arc<dyn BookingBackend>) -> Self {
        Self { events, bookings }
    }

    /// Validate, check the event reference, then insert.
    ///
    /// A second booking for the same (event, email) fails with
    /// [`StoreError::Conflict`], even when both race past the guard.
    pub async fn create_booking(&self, draft: BookingDraft) -> StoreResult<Booking> {
        let email = Email::new(&draft.email)?;
        let event_id = check_event_reference(self.events.as_ref(), &draft.event_id).await?;

        let booking = self
            .bookings
            .insert_booking(NewBooking { event_id, email })
            .await
            .map_err(|err| reference_lost(err, event_id))?;

        tracing::info!(booking_id = %booking.id, %event_id, "booking created");
        Ok(booking)
    }

    /// Edit a booking. The event reference is re-checked only when the
    /// patch points the booking at a different event.
    pub async fn update_booking(&self, id: Uuid, patch: BookingPatch) -> StoreResult<Booking> {
        let previous = self
            .bookings
            .find_booking(id)
            .await?
            .ok_or_else(|| StoreError::NotFound {
                resource: "booking",
                id: id.to_string(),
            })?;

        let email = Email::new(patch.email.as_deref().unwrap_or(&previous.email))?;
        let event_id = match patch.event_id.as_deref().map(str::trim) {
            Some(raw) if Uuid::parse_str(raw).ok() != Some(previous.event_id) => {
                check_event_reference(self.events.as_ref(), raw).await?
            }
            _ => previous.event_id,
        };

        self.bookings
            .update_booking(id, NewBooking { event_id, email })
            .await
            .map_err(|err| reference_lost(err, event_id))
    }

    /// Bookings for an event, newest first.
    pub async fn list_bookings_for_event(&self, event_id: Uuid) -> StoreResult<Vec<Booking>> {
        Ok(self.bookings.list_bookings_for_event(event_id).await?)
    }

    pub async fn count_bookings_for_event(&self, event_id: Uuid) -> StoreResult<i64> {
        Ok(self.bookings.count_bookings_for_event(event_id).await?)
    }
}

/// The event vanished between the guard and the write.
fn reference_lost(err: DbError, event_id: Uuid) -> StoreError {
    match err {
        DbError::ForeignKeyViolation { .. } => ValidationError::EventNotFound { event_id }.into(),
        other => other.into(),
    }
}
