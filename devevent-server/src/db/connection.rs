//! Process-wide connection cache
//!
//! The first caller starts establishing the connection; every caller that
//! arrives while that attempt is in flight awaits the same attempt instead
//! of opening its own. A failed attempt is dropped so the next call starts
//! over, and a failed handle is never cached.
//!
//! State machine: `Uninitialized -> Connecting -> Connected`, with
//! `Connecting -> Uninitialized` on failure.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt, Shared};
use sqlx::PgPool;

use super::migrations;
use super::pool::create_pool_with_options;
use super::DbError;

/// Environment variable holding the connection string
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Establishes a connection handle from a connection string.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    type Handle: Clone + Send + Sync + 'static;

    async fn connect(&self, url: &str) -> Result<Self::Handle, sqlx::Error>;
}

type Attempt<H> = Shared<BoxFuture<'static, Result<H, Arc<sqlx::Error>>>>;

enum ConnectionState<H> {
    Uninitialized,
    Connecting(Attempt<H>),
    Connected(H),
}

/// Caches one live handle and at most one in-flight attempt.
pub struct ConnectionManager<C: Connector> {
    connector: Arc<C>,
    database_url: Option<String>,
    state: Mutex<ConnectionState<C::Handle>>,
}

impl<C: Connector> ConnectionManager<C> {
    /// A blank or missing URL is accepted here and reported on first use.
    pub fn new(connector: C, database_url: Option<String>) -> Self {
        Self {
            connector: Arc::new(connector),
            database_url: database_url.filter(|url| !url.trim().is_empty()),
            state: Mutex::new(ConnectionState::Uninitialized),
        }
    }

    /// Return the live handle, establishing it if needed.
    pub async fn get(&self) -> Result<C::Handle, DbError> {
        let attempt = {
            let mut state = self.lock_state();
            match &*state {
                ConnectionState::Connected(handle) => return Ok(handle.clone()),
                ConnectionState::Connecting(attempt) => attempt.clone(),
                ConnectionState::Uninitialized => {
                    let url = self
                        .database_url
                        .clone()
                        .ok_or(DbError::Configuration(DATABASE_URL_VAR))?;
                    tracing::info!("establishing database connection");
                    let connector = Arc::clone(&self.connector);
                    let attempt = async move { connector.connect(&url).await.map_err(Arc::new) }
                        .boxed()
                        .shared();
                    *state = ConnectionState::Connecting(attempt.clone());
                    attempt
                }
            }
        };

        let outcome = attempt.clone().await;

        let mut state = self.lock_state();
        let current = matches!(
            &*state,
            ConnectionState::Connecting(pending) if pending.ptr_eq(&attempt)
        );

        match outcome {
            Ok(handle) => {
                if current {
                    tracing::info!("database connection established");
                    *state = ConnectionState::Connected(handle.clone());
                }
                Ok(handle)
            }
            Err(err) => {
                if current {
                    tracing::warn!(error = %err, "database connection failed, next call will retry");
                    *state = ConnectionState::Uninitialized;
                }
                Err(DbError::Connect(err))
            }
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(&*self.lock_state(), ConnectionState::Connected(_))
    }

    // Never held across an await, so a poisoned lock still holds valid state.
    fn lock_state(&self) -> MutexGuard<'_, ConnectionState<C::Handle>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Opens the PostgreSQL pool and brings the schema up to date.
#[derive(Debug, Clone)]
pub struct PgConnector {
    pub max_connections: u32,
    pub run_migrations: bool,
}

impl Default for PgConnector {
    fn default() -> Self {
        Self {
            max_connections: super::pool::DEFAULT_MAX_CONNECTIONS,
            run_migrations: true,
        }
    }
}

#[async_trait]
impl Connector for PgConnector {
    type Handle = PgPool;

    async fn connect(&self, url: &str) -> Result<PgPool, sqlx::Error> {
        let pool = create_pool_with_options(url, self.max_connections).await?;
        if self.run_migrations {
            migrations::run(&pool).await?;
        }
        Ok(pool)
    }
}
