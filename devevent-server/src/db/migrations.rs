//! Schema for the events and bookings tables
//!
//! Idempotent; runs every time the connection manager opens a pool.

use sqlx::PgPool;

/// Run all migrations
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running devevent migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS events (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            title TEXT NOT NULL CHECK (char_length(title) <= 100),
            slug TEXT NOT NULL,
            description TEXT NOT NULL CHECK (char_length(description) <= 1000),
            overview TEXT NOT NULL CHECK (char_length(overview) <= 500),
            image TEXT NOT NULL,
            venue TEXT NOT NULL,
            location TEXT NOT NULL,
            date TEXT NOT NULL,
            time TEXT NOT NULL,
            mode TEXT NOT NULL CHECK (mode IN ('online', 'offline', 'hybrid')),
            audience TEXT NOT NULL,
            agenda TEXT[] NOT NULL CHECK (cardinality(agenda) > 0),
            organizer TEXT NOT NULL,
            tags TEXT[] NOT NULL CHECK (cardinality(tags) > 0),
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Deleting an event that still has bookings is refused
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bookings (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            event_id UUID NOT NULL REFERENCES events(id) ON DELETE RESTRICT,
            email TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    let indexes = [
        "CREATE UNIQUE INDEX IF NOT EXISTS events_slug_key ON events (slug)",
        "CREATE INDEX IF NOT EXISTS events_date_mode_idx ON events (date, mode)",
        "CREATE INDEX IF NOT EXISTS events_created_at_idx ON events (created_at DESC)",
        "CREATE UNIQUE INDEX IF NOT EXISTS uniq_event_email ON bookings (event_id, email)",
        "CREATE INDEX IF NOT EXISTS bookings_event_created_idx ON bookings (event_id, created_at DESC)",
        "CREATE INDEX IF NOT EXISTS bookings_email_idx ON bookings (email)",
    ];

    for statement in indexes {
        sqlx::query(statement).execute(pool).await?;
    }

    tracing::info!("devevent migrations complete");
    Ok(())
}
