//! Tag repository implementation

use crate::Result;
use crate::error::PersistenceError;
use crate::model::{Attributes, Tag, TrashState};
use crate::repository::TagRepository;
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use std::time::{SystemTime, UNIX_EPOCH};

/// Repository for tag records stored in SQLite
#[derive(Debug, Clone)]
pub struct SqliteTagRepository {
    pool: SqlitePool,
}

impl SqliteTagRepository {
    /// Create a new tag repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_tag(row: &SqliteRow) -> Result<Tag> {
        let trash_code: i64 = row.try_get("trash_state")?;
        let attributes: String = row.try_get("attributes")?;

        Ok(Tag {
            id: Some(row.try_get("id")?),
            name: row.try_get("name")?,
            profile_id: row.try_get("profile_id")?,
            trash_state: TrashState::try_from(trash_code)?,
            attributes: serde_json::from_str::<Attributes>(&attributes)?,
        })
    }
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

#[async_trait]
impl TagRepository for SqliteTagRepository {
    async fn save(&self, tag: Tag) -> Result<Tag> {
        let id = tag.require_id()?;
        let attributes = serde_json::to_string(&tag.attributes)?;
        let now = now_millis();

        sqlx::query(
            r#"
            INSERT INTO tags (id, name, profile_id, trash_state, attributes, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                profile_id = excluded.profile_id,
                trash_state = excluded.trash_state,
                attributes = excluded.attributes,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(id)
        .bind(&tag.name)
        .bind(&tag.profile_id)
        .bind(tag.trash_state.as_code())
        .bind(&attributes)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| PersistenceError::save_failed(id, &e.to_string()))?;

        Ok(tag)
    }

    async fn remove(&self, tag: &Tag) -> Result<()> {
        let id = tag.require_id()?;

        sqlx::query("DELETE FROM tags WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| PersistenceError::remove_failed(id, &e.to_string()))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Tag>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, profile_id, trash_state, attributes
            FROM tags
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_tag).transpose()
    }

    async fn list(&self, profile_id: Option<&str>) -> Result<Vec<Tag>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, profile_id, trash_state, attributes
            FROM tags
            WHERE ?1 IS NULL OR profile_id = ?1
            ORDER BY name ASC, id ASC
            "#,
        )
        .bind(profile_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_tag).collect()
    }

    async fn count(&self) -> Result<u64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tags")
            .fetch_one(&self.pool)
            .await?;

        Ok(count as u64)
    }
}
