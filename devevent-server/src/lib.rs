//! devevent-server: persistence and HTTP API for developer events
//!
//! Events and bookings are written through [`store::EventStore`] and
//! [`store::BookingStore`], which validate before handing records to a
//! backend. The PostgreSQL backend draws its pool from a lazily
//! established, process-wide [`db::ConnectionManager`].

pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod media;
pub mod store;

pub use config::ServerArgs;
pub use error::{StoreError, StoreResult};
pub use http::{build_router, run_server, AppState, ServerConfig};
pub use store::{stores, BookingStore, EventStore};
