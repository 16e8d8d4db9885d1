//! Domain models with validation at construction
//!
//! Invalid input returns ValidationError, not panic.

pub mod booking;
pub mod event;
pub mod validation;

pub use booking::{Booking, BookingDraft, BookingPatch, Email, NewBooking};
pub use event::{Event, EventDraft, EventMode, EventPatch, NewEvent};
pub use validation::ValidationError;
