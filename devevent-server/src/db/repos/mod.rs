//! Repository implementations for PostgreSQL access
//!
//! Each repository follows these patterns:
//! - Explicit column lists, rows mapped by name
//! - Handles conflicts via unique indexes (no check-then-insert)

pub mod bookings;
pub mod events;

pub use bookings::BookingRepo;
pub use events::EventRepo;
