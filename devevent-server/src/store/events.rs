//! Event store

use std::sync::Arc;

use devevent_core::{normalize_event, Event, EventDraft, EventPatch};
use uuid::Uuid;

use super::EventBackend;
use crate::db::DbError;
use crate::error::{StoreError, StoreResult};

#[derive(Clone)]
pub struct EventStore {
    backend: Arc<dyn EventBackend>,
}

impl EventStore {
    pub fn new(backend: Arc<dyn EventBackend>) -> Self {
        Self { backend }
    }

    /// Normalize and persist a new event.
    pub async fn create_event(&self, draft: EventDraft) -> StoreResult<Event> {
        let normalized = normalize_event(draft, None)?;
        let event = self.backend.insert_event(normalized).await?;
        tracing::info!(event_id = %event.id, slug = %event.slug, "event created");
        Ok(event)
    }

    /// Apply a partial edit. Slug, date and time are re-derived only for
    /// the fields the patch actually changes.
    pub async fn update_event(&self, id: Uuid, patch: EventPatch) -> StoreResult<Event> {
        let previous = self.require_event(id).await?;
        if patch.is_empty() {
            return Ok(previous);
        }

        let normalized = normalize_event(patch.apply_to(&previous), Some(&previous))?;
        let event = self.backend.update_event(id, normalized).await?;
        if event.slug != previous.slug {
            tracing::info!(event_id = %id, from = %previous.slug, to = %event.slug, "event slug changed");
        }
        Ok(event)
    }

    pub async fn find_event(&self, id: Uuid) -> StoreResult<Option<Event>> {
        Ok(self.backend.find_event(id).await?)
    }

    /// Exact match on the canonical slug. Callers trim and lowercase first.
    pub async fn find_event_by_slug(&self, slug: &str) -> StoreResult<Option<Event>> {
        Ok(self.backend.find_event_by_slug(slug).await?)
    }

    /// All events, newest first.
    pub async fn list_events(&self) -> StoreResult<Vec<Event>> {
        Ok(self.backend.list_events().await?)
    }

    /// Delete an event that has no bookings.
    pub async fn delete_event(&self, id: Uuid) -> StoreResult<()> {
        match self.backend.delete_event(id).await {
            Ok(true) => {
                tracing::info!(event_id = %id, "event deleted");
                Ok(())
            }
            Ok(false) => Err(StoreError::NotFound {
                resource: "event",
                id: id.to_string(),
            }),
            Err(DbError::ForeignKeyViolation { .. }) => Err(StoreError::Conflict(
                "event still has bookings".into(),
            )),
            Err(err) => Err(err.into()),
        }
    }

    async fn require_event(&self, id: Uuid) -> StoreResult<Event> {
        self.backend
            .find_event(id)
            .await?
            .ok_or_else(|| StoreError::NotFound {
                resource: "event",
                id: id.to_string(),
            })
    }
}
