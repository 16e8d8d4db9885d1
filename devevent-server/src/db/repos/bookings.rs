//! Booking repository
//!
//! One booking per (event, email) is enforced by the `uniq_event_email`
//! index, so two racing inserts cannot both succeed.

use devevent_core::{Booking, NewBooking};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::db::DbError;

/// Booking repository
pub struct BookingRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> BookingRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, booking: &NewBooking) -> Result<Booking, DbError> {
        let row = sqlx::query(
            r#"
            INSERT INTO bookings (event_id, email)
            VALUES ($1, $2)
            RETURNING id, event_id, email, created_at, updated_at
            "#,
        )
        .bind(booking.event_id)
        .bind(booking.email.as_str())
        .fetch_one(self.pool)
        .await?;

        booking_from_row(&row)
    }

    pub async fn update(&self, id: Uuid, booking: &NewBooking) -> Result<Booking, DbError> {
        let row = sqlx::query(
            r#"
            UPDATE bookings
            SET event_id = $2, email = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, event_id, email, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(booking.event_id)
        .bind(booking.email.as_str())
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "booking",
            id: id.to_string(),
        })?;

        booking_from_row(&row)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Booking>, DbError> {
        sqlx::query(
            r#"
            SELECT id, event_id, email, created_at, updated_at
            FROM bookings
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .map(|row| booking_from_row(&row))
        .transpose()
    }

    /// Bookings for an event, newest first (served by the event/created_at index).
    pub async fn list_for_event(&self, event_id: Uuid) -> Result<Vec<Booking>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT id, event_id, email, created_at, updated_at
            FROM bookings
            WHERE event_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(event_id)
        .fetch_all(self.pool)
        .await?;

        rows.iter().map(booking_from_row).collect()
    }

    pub async fn count_for_event(&self, event_id: Uuid) -> Result<i64, DbError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM bookings WHERE event_id = $1")
            .bind(event_id)
            .fetch_one(self.pool)
            .await?;
        Ok(count.0)
    }
}

fn booking_from_row(row: &PgRow) -> Result<Booking, DbError> {
    Ok(Booking {
        id: row.try_get("id")?,
        event_id: row.try_get("event_id")?,
        email: row.try_get("email")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
