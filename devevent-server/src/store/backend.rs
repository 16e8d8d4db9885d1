//! Persistence contracts implemented by each storage backend
//!
//! Backends only store and fetch. Validation, normalization and the event
//! reference check happen in the stores before any of these are called.
//! Backends must reject duplicate slugs and duplicate (event, email) pairs
//! atomically with [`DbError::UniqueViolation`].

use async_trait::async_trait;
use devevent_core::{Booking, Event, NewBooking, NewEvent};
use uuid::Uuid;

use crate::db::DbError;

#[async_trait]
pub trait EventBackend: Send + Sync {
    async fn insert_event(&self, event: NewEvent) -> Result<Event, DbError>;

    /// Replace the fields of a stored event, bumping `updated_at`.
    async fn update_event(&self, id: Uuid, event: NewEvent) -> Result<Event, DbError>;

    async fn find_event(&self, id: Uuid) -> Result<Option<Event>, DbError>;

    async fn find_event_by_slug(&self, slug: &str) -> Result<Option<Event>, DbError>;

    /// All events, newest `created_at` first.
    async fn list_events(&self) -> Result<Vec<Event>, DbError>;

    /// Identity-only lookup used by the booking guard.
    async fn event_exists(&self, id: Uuid) -> Result<bool, DbError>;

    /// Returns `false` when no such event exists. Fails with
    /// [`DbError::ForeignKeyViolation`] while bookings still reference it.
    async fn delete_event(&self, id: Uuid) -> Result<bool, DbError>;
}

#[async_trait]
pub trait BookingBackend: Send + Sync {
    async fn insert_booking(&self, booking: NewBooking) -> Result<Booking, DbError>;

    async fn update_booking(&self, id: Uuid, booking: NewBooking) -> Result<Booking, DbError>;

    async fn find_booking(&self, id: Uuid) -> Result<Option<Booking>, DbError>;

    /// Bookings for one event, newest first.
    async fn list_bookings_for_event(&self, event_id: Uuid) -> Result<Vec<Booking>, DbError>;

    async fn count_bookings_for_event(&self, event_id: Uuid) -> Result<i64, DbError>;
}
