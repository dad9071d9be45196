//! Document store
//!
//! SQLite-backed repository for the mushroom catalog and sighting reports.
//! The [`Store`] owns the connection pool: open it at startup, hand clones
//! to request handlers, close it at shutdown.

mod mushrooms;
mod reports;
mod schema;
pub mod seed;

pub use reports::MAX_VOTE_ATTEMPTS;
pub use seed::{SeedData, SeedSummary};

use crate::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Handle to the document store
///
/// Cheap to clone; clones share the pool.
#[derive(Clone, Debug)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Open (creating if needed) the database file and its tables
    pub async fn open(db_path: &Path) -> Result<Self> {
        let newly_created = !db_path.exists();

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        // WAL lets readers proceed while a vote is being written
        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_millis(5000));

        let pool = SqlitePoolOptions::new()
            .max_connections(10)
            .connect_with(options)
            .await?;

        if newly_created {
            info!("Initialized new database: {}", db_path.display());
        } else {
            info!("Opened existing database: {}", db_path.display());
        }

        Self::from_pool(pool).await
    }

    /// Private in-memory store, used by tests and throwaway runs
    ///
    /// Every SQLite in-memory connection is its own database, so the pool is
    /// pinned to a single connection that never expires.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        Self::from_pool(pool).await
    }

    /// Wrap an existing pool, creating tables if they are missing
    pub async fn from_pool(pool: SqlitePool) -> Result<Self> {
        schema::create_tables(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close every pooled connection; later queries fail
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Store closed");
    }
}
