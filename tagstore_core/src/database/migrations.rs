//! Database migration system
//!
//! Applies each pending schema version in order and records it in
//! `schema_version`.

use crate::{Error, Result, error::PersistenceError};
use sqlx::SqlitePool;
use std::time::{SystemTime, UNIX_EPOCH};

use super::schema::MIGRATIONS;

/// Run all necessary migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    let current_version = get_current_version(pool).await?;

    for (version, sql) in MIGRATIONS {
        if current_version < *version {
            log::debug!("Applying schema migration {version}");
            apply_migration(pool, *version, sql).await?;
        }
    }

    Ok(())
}

/// Get the current schema version from the database
async fn get_current_version(pool: &SqlitePool) -> Result<i32> {
    if !table_exists(pool, "schema_version").await? {
        return Ok(0);
    }

    let version = sqlx::query_scalar::<_, Option<i32>>("SELECT MAX(version) FROM schema_version")
        .fetch_one(pool)
        .await?;

    Ok(version.unwrap_or(0))
}

/// Apply a single migration
async fn apply_migration(pool: &SqlitePool, version: i32, sql: &str) -> Result<()> {
    let mut tx = pool.begin().await.map_err(|e| {
        Error::Persistence(PersistenceError::storage(format!(
            "Failed to start migration transaction: {e}"
        )))
    })?;

    sqlx::raw_sql(sql).execute(&mut *tx).await.map_err(|e| {
        Error::Persistence(PersistenceError::storage(format!(
            "Failed to apply migration {version}: {e}"
        )))
    })?;

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64;

    sqlx::query("INSERT INTO schema_version (version, applied_at) VALUES (?, ?)")
        .bind(version)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            Error::Persistence(PersistenceError::storage(format!(
                "Failed to record migration {version}: {e}"
            )))
        })?;

    tx.commit().await.map_err(|e| {
        Error::Persistence(PersistenceError::storage(format!(
            "Failed to commit migration {version}: {e}"
        )))
    })?;

    Ok(())
}

/// Check if a table exists
async fn table_exists(pool: &SqlitePool, table_name: &str) -> Result<bool> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?",
    )
    .bind(table_name)
    .fetch_one(pool)
    .await?;

    Ok(count > 0)
}
