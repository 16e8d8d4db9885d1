//! devevent-core: event and booking domain
//!
//! Models are validated at construction and event drafts pass through the
//! normalizer before anything reaches storage. Nothing in this crate does
//! I/O.

pub mod models;
pub mod normalize;

pub use models::{
    Booking, BookingDraft, BookingPatch, Email, Event, EventDraft, EventMode, EventPatch,
    NewBooking, NewEvent, ValidationError,
};
pub use normalize::{derive_slug, normalize_date, normalize_event, normalize_time};
