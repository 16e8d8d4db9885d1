//! In-memory backend
//!
//! Mirrors the PostgreSQL constraints: unique slug, unique (event, email),
//! and the restricting foreign key from bookings to events. Each operation
//! runs inside one critical section, so the uniqueness checks and the
//! inserts are atomic with respect to each other.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use devevent_core::{Booking, Event, NewBooking, NewEvent};
use uuid::Uuid;

use super::{DbError, BOOKING_EVENT_FK, BOOKING_UNIQUE_CONSTRAINT, EVENT_SLUG_CONSTRAINT};
use crate::store::{BookingBackend, EventBackend};

#[derive(Default)]
struct Tables {
    /// Insertion order
    events: Vec<Event>,
    bookings: Vec<Booking>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Tables {
    fn slug_taken(&self, slug: &str, except: Option<Uuid>) -> bool {
        self.events
            .iter()
            .any(|e| e.slug == slug && Some(e.id) != except)
    }

    fn pair_taken(&self, event_id: Uuid, email: &str, except: Option<Uuid>) -> bool {
        self.bookings
            .iter()
            .any(|b| b.event_id == event_id && b.email == email && Some(b.id) != except)
    }

    fn has_event(&self, id: Uuid) -> bool {
        self.events.iter().any(|e| e.id == id)
    }
}

fn unique_violation(constraint: &str) -> DbError {
    DbError::UniqueViolation {
        constraint: constraint.to_owned(),
    }
}

fn fk_violation() -> DbError {
    DbError::ForeignKeyViolation {
        constraint: BOOKING_EVENT_FK.to_owned(),
    }
}

#[async_trait]
impl EventBackend for MemoryStore {
    async fn insert_event(&self, event: NewEvent) -> Result<Event, DbError> {
        let mut tables = self.tables();
        if tables.slug_taken(&event.slug, None) {
            return Err(unique_violation(EVENT_SLUG_CONSTRAINT));
        }

        let now = Utc::now();
        let stored = event.into_event(Uuid::new_v4(), now, now);
        tables.events.push(stored.clone());
        Ok(stored)
    }

    async fn update_event(&self, id: Uuid, event: NewEvent) -> Result<Event, DbError> {
        let mut tables = self.tables();
        if tables.slug_taken(&event.slug, Some(id)) {
            return Err(unique_violation(EVENT_SLUG_CONSTRAINT));
        }

        let slot = tables
            .events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| DbError::NotFound {
                resource: "event",
                id: id.to_string(),
            })?;

        *slot = event.into_event(id, slot.created_at, Utc::now());
        Ok(slot.clone())
    }

    async fn find_event(&self, id: Uuid) -> Result<Option<Event>, DbError> {
        Ok(self.tables().events.iter().find(|e| e.id == id).cloned())
    }

    async fn find_event_by_slug(&self, slug: &str) -> Result<Option<Event>, DbError> {
        Ok(self.tables().events.iter().find(|e| e.slug == slug).cloned())
    }

    async fn list_events(&self) -> Result<Vec<Event>, DbError> {
        // Reverse insertion order first so equal timestamps stay newest-first
        // through the stable sort.
        let mut events: Vec<Event> = self.tables().events.iter().rev().cloned().collect();
        events.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(events)
    }

    async fn event_exists(&self, id: Uuid) -> Result<bool, DbError> {
        Ok(self.tables().has_event(id))
    }

    async fn delete_event(&self, id: Uuid) -> Result<bool, DbError> {
        let mut tables = self.tables();
        if tables.bookings.iter().any(|b| b.event_id == id) {
            return Err(fk_violation());
        }
        let before = tables.events.len();
        tables.events.retain(|e| e.id != id);
        Ok(tables.events.len() < before)
    }
}

#[async_trait]
impl BookingBackend for MemoryStore {
    async fn insert_booking(&self, booking: NewBooking) -> Result<Booking, DbError> {
        let mut tables = self.tables();
        if !tables.has_event(booking.event_id) {
            return Err(fk_violation());
        }
        if tables.pair_taken(booking.event_id, booking.email.as_str(), None) {
            return Err(unique_violation(BOOKING_UNIQUE_CONSTRAINT));
        }

        let now = Utc::now();
        let stored = Booking {
            id: Uuid::new_v4(),
            event_id: booking.event_id,
            email: booking.email.into_string(),
            created_at: now,
            updated_at: now,
        };
        tables.bookings.push(stored.clone());
        Ok(stored)
    }

    async fn update_booking(&self, id: Uuid, booking: NewBooking) -> Result<Booking, DbError> {
        let mut tables = self.tables();
        if !tables.has_event(booking.event_id) {
            return Err(fk_violation());
        }
        if tables.pair_taken(booking.event_id, booking.email.as_str(), Some(id)) {
            return Err(unique_violation(BOOKING_UNIQUE_CONSTRAINT));
        }

        let slot = tables
            .bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| DbError::NotFound {
                resource: "booking",
                id: id.to_string(),
            })?;

        slot.event_id = booking.event_id;
        slot.email = booking.email.into_string();
        slot.updated_at = Utc::now();
        Ok(slot.clone())
    }

    async fn find_booking(&self, id: Uuid) -> Result<Option<Booking>, DbError> {
        Ok(self.tables().bookings.iter().find(|b| b.id == id).cloned())
    }

    async fn list_bookings_for_event(&self, event_id: Uuid) -> Result<Vec<Booking>, DbError> {
        let mut bookings: Vec<Booking> = self
            .tables()
            .bookings
            .iter()
            .rev()
            .filter(|b| b.event_id == event_id)
            .cloned()
            .collect();
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(bookings)
    }

    async fn count_bookings_for_event(&self, event_id: Uuid) -> Result<i64, DbError> {
        let count = self
            .tables()
            .bookings
            .iter()
            .filter(|b| b.event_id == event_id)
            .count();
        Ok(count as i64)
    }
}

#[cfg(test)]
mod tests {
    use devevent_core::{normalize_event, Email, EventDraft};

    use super::*;

    fn new_event(title: &str) -> NewEvent {
        let draft = EventDraft {
            title: title.into(),
            description: "d".into(),
            overview: "o".into(),
            image: "https://img.example.com/x.png".into(),
            venue: "v".into(),
            location: "l".into(),
            date: "2025-01-01".into(),
            time: "10:00".into(),
            mode: "online".into(),
            audience: "a".into(),
            agenda: vec!["intro".into()],
            organizer: "org".into(),
            tags: vec!["t".into()],
        };
        normalize_event(draft, None).unwrap()
    }

    #[tokio::test]
    async fn duplicate_slug_rejected() {
        let store = MemoryStore::new();
        store.insert_event(new_event("Same Title")).await.unwrap();
        let err = store.insert_event(new_event("Same  Title!")).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { ref constraint } if constraint == EVENT_SLUG_CONSTRAINT));
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let store = MemoryStore::new();
        store.insert_event(new_event("First")).await.unwrap();
        store.insert_event(new_event("Second")).await.unwrap();
        store.insert_event(new_event("Third")).await.unwrap();

        let slugs: Vec<String> = store
            .list_events()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.slug)
            .collect();
        assert_eq!(slugs, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn delete_refused_while_booked() {
        let store = MemoryStore::new();
        let event = store.insert_event(new_event("Booked")).await.unwrap();
        store
            .insert_booking(NewBooking {
                event_id: event.id,
                email: Email::new("a@example.com").unwrap(),
            })
            .await
            .unwrap();

        assert!(matches!(
            store.delete_event(event.id).await,
            Err(DbError::ForeignKeyViolation { .. })
        ));
        assert!(store.event_exists(event.id).await.unwrap());
    }

    #[tokio::test]
    async fn delete_missing_returns_false() {
        let store = MemoryStore::new();
        assert!(!store.delete_event(Uuid::new_v4()).await.unwrap());
    }
}
