//! Database module for SQLite-based tag storage

pub mod migrations;
pub mod repositories;
pub mod schema;

use crate::{Error, Result, error::PersistenceError};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

pub use repositories::SqliteTagRepository;

/// Database connection manager with connection pooling
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new database connection with migrations
    pub async fn new(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                Error::Persistence(PersistenceError::storage(format!(
                    "Failed to create {}: {e}",
                    parent.display()
                )))
            })?;
        }

        let connect_options =
            SqliteConnectOptions::from_str(&format!("sqlite://{}", db_path.display()))?
                .create_if_missing(true)
                .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(5)
            .connect_with(connect_options)
            .await
            .map_err(|e| {
                Error::Persistence(PersistenceError::storage(format!(
                    "Failed to connect to database: {e}"
                )))
            })?;

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Repository over the `tags` table
    pub fn tag_repository(&self) -> SqliteTagRepository {
        SqliteTagRepository::new(self.pool.clone())
    }

    async fn migrate(&self) -> Result<()> {
        migrations::run_migrations(&self.pool).await
    }
}
