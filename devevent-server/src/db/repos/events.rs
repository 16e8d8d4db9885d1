//! Event repository
//!
//! Slug uniqueness is left to the `events_slug_key` index; a duplicate
//! surfaces as `DbError::UniqueViolation`.

use devevent_core::{Event, EventMode, NewEvent};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::db::DbError;

const EVENT_COLUMNS: &str = "id, title, slug, description, overview, image, venue, location, \
     date, time, mode, audience, agenda, organizer, tags, created_at, updated_at";

/// Event repository
pub struct EventRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> EventRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, event: &NewEvent) -> Result<Event, DbError> {
        let sql = format!(
            r#"
            INSERT INTO events (
                title, slug, description, overview, image, venue, location,
                date, time, mode, audience, agenda, organizer, tags
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING {EVENT_COLUMNS}
            "#
        );

        let row = bind_fields(sqlx::query(&sql), event)
            .fetch_one(self.pool)
            .await?;

        event_from_row(&row)
    }

    pub async fn update(&self, id: Uuid, event: &NewEvent) -> Result<Event, DbError> {
        let sql = format!(
            r#"
            UPDATE events SET
                title = $1, slug = $2, description = $3, overview = $4, image = $5,
                venue = $6, location = $7, date = $8, time = $9, mode = $10,
                audience = $11, agenda = $12, organizer = $13, tags = $14,
                updated_at = NOW()
            WHERE id = $15
            RETURNING {EVENT_COLUMNS}
            "#
        );

        let row = bind_fields(sqlx::query(&sql), event)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::NotFound {
                resource: "event",
                id: id.to_string(),
            })?;

        event_from_row(&row)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Event>, DbError> {
        let sql = format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = $1");
        sqlx::query(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .map(|row| event_from_row(&row))
            .transpose()
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Event>, DbError> {
        let sql = format!("SELECT {EVENT_COLUMNS} FROM events WHERE slug = $1");
        sqlx::query(&sql)
            .bind(slug)
            .fetch_optional(self.pool)
            .await?
            .map(|row| event_from_row(&row))
            .transpose()
    }

    /// All events, newest first.
    pub async fn list(&self) -> Result<Vec<Event>, DbError> {
        let sql = format!("SELECT {EVENT_COLUMNS} FROM events ORDER BY created_at DESC");
        let rows = sqlx::query(&sql).fetch_all(self.pool).await?;
        rows.iter().map(event_from_row).collect()
    }

    /// Identity-only existence check.
    pub async fn exists(&self, id: Uuid) -> Result<bool, DbError> {
        let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM events WHERE id = $1)")
            .bind(id)
            .fetch_one(self.pool)
            .await?;
        Ok(exists.0)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn bind_fields<'q>(
    query: sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments>,
    event: &'q NewEvent,
) -> sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments> {
    query
        .bind(&event.title)
        .bind(&event.slug)
        .bind(&event.description)
        .bind(&event.overview)
        .bind(&event.image)
        .bind(&event.venue)
        .bind(&event.location)
        .bind(&event.date)
        .bind(&event.time)
        .bind(event.mode.as_str())
        .bind(&event.audience)
        .bind(&event.agenda)
        .bind(&event.organizer)
        .bind(&event.tags)
}

fn event_from_row(row: &PgRow) -> Result<Event, DbError> {
    let mode: String = row.try_get("mode")?;
    let mode: EventMode = mode.parse().map_err(|_| DbError::Decode {
        resource: "event",
        reason: format!("unknown mode '{mode}'"),
    })?;

    Ok(Event {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        slug: row.try_get("slug")?,
        description: row.try_get("description")?,
        overview: row.try_get("overview")?,
        image: row.try_get("image")?,
        venue: row.try_get("venue")?,
        location: row.try_get("location")?,
        date: row.try_get("date")?,
        time: row.try_get("time")?,
        mode,
        audience: row.try_get("audience")?,
        agenda: row.try_get("agenda")?,
        organizer: row.try_get("organizer")?,
        tags: row.try_get("tags")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
