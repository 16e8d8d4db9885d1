//! Database layer - connection manager, backends and repositories
//!
//! # Design Principles
//!
//! - One pool per process, created lazily by [`ConnectionManager`]
//! - Rely on DB constraints, handle conflicts - no check-then-insert
//! - The in-memory backend gives the same atomicity guarantees

pub mod connection;
pub mod error;
pub mod memory;
pub mod migrations;
pub mod pool;
pub mod postgres;
pub mod repos;

pub use connection::{ConnectionManager, Connector, PgConnector, DATABASE_URL_VAR};
pub use error::DbError;
pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Unique index on `events.slug`
pub const EVENT_SLUG_CONSTRAINT: &str = "events_slug_key";

/// Unique index on `bookings (event_id, email)`
pub const BOOKING_UNIQUE_CONSTRAINT: &str = "uniq_event_email";

/// Foreign key from `bookings.event_id` to `events.id`
pub const BOOKING_EVENT_FK: &str = "bookings_event_id_fkey";
