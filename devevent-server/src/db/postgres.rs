//! PostgreSQL backend
//!
//! Every call asks the connection manager for the pool first, so the pool
//! is opened by whichever request arrives first.

use std::sync::Arc;

use async_trait::async_trait;
use devevent_core::{Booking, Event, NewBooking, NewEvent};
use sqlx::PgPool;
use uuid::Uuid;

use super::repos::{BookingRepo, EventRepo};
use super::{ConnectionManager, DbError, PgConnector};
use crate::store::{BookingBackend, EventBackend};

#[derive(Clone)]
pub struct PgStore {
    connections: Arc<ConnectionManager<PgConnector>>,
}

impl PgStore {
    pub fn new(connections: Arc<ConnectionManager<PgConnector>>) -> Self {
        Self { connections }
    }

    async fn pool(&self) -> Result<PgPool, DbError> {
        self.connections.get().await
    }
}

#[async_trait]
impl EventBackend for PgStore {
    async fn insert_event(&self, event: NewEvent) -> Result<Event, DbError> {
        let pool = self.pool().await?;
        EventRepo::new(&pool).insert(&event).await
    }

    async fn update_event(&self, id: Uuid, event: NewEvent) -> Result<Event, DbError> {
        let pool = self.pool().await?;
        EventRepo::new(&pool).update(id, &event).await
    }

    async fn find_event(&self, id: Uuid) -> Result<Option<Event>, DbError> {
        let pool = self.pool().await?;
        EventRepo::new(&pool).get(id).await
    }

    async fn find_event_by_slug(&self, slug: &str) -> Result<Option<Event>, DbError> {
        let pool = self.pool().await?;
        EventRepo::new(&pool).find_by_slug(slug).await
    }

    async fn list_events(&self) -> Result<Vec<Event>, DbError> {
        let pool = self.pool().await?;
        EventRepo::new(&pool).list().await
    }

    async fn event_exists(&self, id: Uuid) -> Result<bool, DbError> {
        let pool = self.pool().await?;
        EventRepo::new(&pool).exists(id).await
    }

    async fn delete_event(&self, id: Uuid) -> Result<bool, DbError> {
        let pool = self.pool().await?;
        EventRepo::new(&pool).delete(id).await
    }
}

#[async_trait]
impl BookingBackend for PgStore {
    async fn insert_booking(&self, booking: NewBooking) -> Result<Booking, DbError> {
        let pool = self.pool().await?;
        BookingRepo::new(&pool).insert(&booking).await
    }

    async fn update_booking(&self, id: Uuid, booking: NewBooking) -> Result<Booking, DbError> {
        let pool = self.pool().await?;
        BookingRepo::new(&pool).update(id, &booking).await
    }

    async fn find_booking(&self, id: Uuid) -> Result<Option<Booking>, DbError> {
        let pool = self.pool().await?;
        BookingRepo::new(&pool).get(id).await
    }

    async fn list_bookings_for_event(&self, event_id: Uuid) -> Result<Vec<Booking>, DbError> {
        let pool = self.pool().await?;
        BookingRepo::new(&pool).list_for_event(event_id).await
    }

    async fn count_bookings_for_event(&self, event_id: Uuid) -> Result<i64, DbError> {
        let pool = self.pool().await?;
        BookingRepo::new(&pool).count_for_event(event_id).await
    }
}
