//! PostgreSQL backend tests
//!
//! Run with `DATABASE_URL` pointing at a scratch database:
//! `cargo test -p devevent-server --test postgres_store -- --ignored`

use std::sync::Arc;

use devevent_core::{BookingDraft, EventDraft, ValidationError};
use devevent_server::db::{ConnectionManager, PgConnector, PgStore};
use devevent_server::{stores, BookingStore, EventStore, StoreError};
use uuid::Uuid;

fn pg_stores() -> (EventStore, BookingStore) {
    let url = std::env::var("DATABASE_URL").ok();
    let manager = ConnectionManager::new(PgConnector::default(), url);
    stores(Arc::new(PgStore::new(Arc::new(manager))))
}

// Unique per run so reruns against the same database do not collide.
fn draft(prefix: &str) -> EventDraft {
    EventDraft {
        title: format!("{prefix} {}", Uuid::new_v4().simple()),
        description: "Integration test event".into(),
        overview: "Overview".into(),
        image: "https://res.cloudinary.com/demo/image/upload/test.png".into(),
        venue: "Main Hall".into(),
        location: "Remote".into(),
        date: "2025-03-05T18:00:00Z".into(),
        time: "18:00".into(),
        mode: "online".into(),
        audience: "Developers".into(),
        agenda: vec!["Talk".into()],
        organizer: "Tests".into(),
        tags: vec!["test".into()],
    }
}

#[tokio::test]
#[ignore = "requires database"]
async fn event_roundtrip_and_slug_lookup() {
    let (events, _) = pg_stores();

    let created = events.create_event(draft("Pg Event")).await.unwrap();
    assert_eq!(created.date, "2025-03-05");

    let found = events.find_event_by_slug(&created.slug).await.unwrap().unwrap();
    assert_eq!(found.id, created.id);

    let listed = events.list_events().await.unwrap();
    assert!(listed.iter().any(|e| e.id == created.id));

    events.delete_event(created.id).await.unwrap();
    assert!(events.find_event(created.id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires database"]
async fn booking_constraints_hold() {
    let (events, bookings) = pg_stores();
    let event = events.create_event(draft("Pg Booking")).await.unwrap();
    let request = BookingDraft {
        event_id: event.id.to_string(),
        email: "pg@example.com".into(),
    };

    bookings.create_booking(request.clone()).await.unwrap();
    let err = bookings.create_booking(request).await.unwrap_err();
    assert!(matches!(err, StoreError::Conflict(_)));

    let err = events.delete_event(event.id).await.unwrap_err();
    assert!(matches!(err, StoreError::Conflict(_)));

    let err = bookings
        .create_booking(BookingDraft {
            event_id: Uuid::new_v4().to_string(),
            email: "pg@example.com".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation(ValidationError::EventNotFound { .. })));
}

#[tokio::test]
async fn missing_url_is_configuration_error() {
    let manager = ConnectionManager::new(PgConnector::default(), None);
    let (events, bookings) = stores(Arc::new(PgStore::new(Arc::new(manager))));

    let err = events.list_events().await.unwrap_err();
    assert!(matches!(err, StoreError::Configuration(_)));

    // The guard does not mask it as a validation failure.
    let err = bookings
        .create_booking(BookingDraft {
            event_id: Uuid::new_v4().to_string(),
            email: "dev@example.com".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Configuration(_)));
}
