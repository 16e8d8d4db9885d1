//! Event and booking stores
//!
//! The stores are the write path: they run the normalizer or the booking
//! guard, then hand the validated record to a backend. A failure at any
//! step aborts the write before the backend is touched.

pub mod backend;
pub mod bookings;
pub mod events;
pub mod guard;

use std::sync::Arc;

pub use backend::{BookingBackend, EventBackend};
pub use bookings::BookingStore;
pub use events::EventStore;

/// Build both stores over one backend.
pub fn stores<B>(backend: Arc<B>) -> (EventStore, BookingStore)
where
    B: EventBackend + BookingBackend + 'static,
{
    let events: Arc<dyn EventBackend> = backend.clone();
    let bookings: Arc<dyn BookingBackend> = backend;
    (
        EventStore::new(Arc::clone(&events)),
        BookingStore::new(events, bookings),
    )
}
