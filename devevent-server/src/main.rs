use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use devevent_server::db::{ConnectionManager, PgConnector, PgStore};
use devevent_server::media::{CloudinaryStore, MediaStore, UnconfiguredMedia};
use devevent_server::{run_server, stores, AppState, ServerArgs};

fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Existing environment variables win over .env entries
    dotenvy::dotenv().ok();
    init_tracing().ok();
    let args = ServerArgs::parse();

    if args.database_url.is_none() {
        tracing::warn!("DATABASE_URL not set; store requests will fail until it is configured");
    }

    let connector = PgConnector {
        max_connections: args.max_connections,
        run_migrations: true,
    };
    let connections = Arc::new(ConnectionManager::new(connector, args.database_url.clone()));
    let (events, bookings) = stores(Arc::new(PgStore::new(connections)));

    let media: Arc<dyn MediaStore> = match args.media_config() {
        Some(config) => {
            tracing::info!(cloud = %config.cloud_name, folder = %config.folder, "media uploads enabled");
            Arc::new(CloudinaryStore::new(config))
        }
        None => {
            tracing::warn!("Cloudinary credentials not set; event publishing is disabled");
            Arc::new(UnconfiguredMedia)
        }
    };

    let state = AppState {
        events,
        bookings,
        media,
    };

    run_server(state, args.server_config())
        .await
        .context("Server error")?;

    Ok(())
}
