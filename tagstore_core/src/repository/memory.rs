//! In-memory tag repository

use crate::Result;
use crate::model::Tag;
use crate::repository::TagRepository;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Tag repository backed by a map keyed by tag id
#[derive(Debug, Default, Clone)]
pub struct MemoryTagRepository {
    entries: Arc<RwLock<HashMap<String, Tag>>>,
}

impl MemoryTagRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with stored records
    pub async fn with_tags(tags: impl IntoIterator<Item = Tag>) -> Result<Self> {
        let repository = Self::new();
        for tag in tags {
            repository.save(tag).await?;
        }
        Ok(repository)
    }
}

#[async_trait]
impl TagRepository for MemoryTagRepository {
    async fn save(&self, tag: Tag) -> Result<Tag> {
        let id = tag.require_id()?.to_string();
        let mut entries = self.entries.write().await;
        entries.insert(id, tag.clone());
        Ok(tag)
    }

    async fn remove(&self, tag: &Tag) -> Result<()> {
        let id = tag.require_id()?;
        self.entries.write().await.remove(id);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Tag>> {
        Ok(self.entries.read().await.get(id).cloned())
    }

    async fn list(&self, profile_id: Option<&str>) -> Result<Vec<Tag>> {
        let entries = self.entries.read().await;
        let mut tags: Vec<Tag> = entries
            .values()
            .filter(|tag| profile_id.is_none_or(|profile| tag.profile_id == profile))
            .cloned()
            .collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(tags)
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.entries.read().await.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::error::PersistenceError;
    use crate::model::TagDraft;

    fn stored(id: &str, name: &str, profile: &str) -> Tag {
        let mut tag = Tag::new(name, profile);
        tag.id = Some(id.to_string());
        tag
    }

    #[tokio::test]
    async fn test_save_is_create_or_update() {
        let repo = MemoryTagRepository::new();
        repo.save(stored("a1", "alpha", "p1")).await.unwrap();
        repo.save(stored("a1", "alpha", "p2")).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 1);
        let tag = repo.find_by_id("a1").await.unwrap().unwrap();
        assert_eq!(tag.profile_id, "p2");
    }

    #[tokio::test]
    async fn test_save_without_id_fails() {
        let repo = MemoryTagRepository::new();
        let error = repo.save(Tag::new("alpha", "p1")).await.unwrap_err();
        assert!(matches!(
            error,
            Error::Persistence(PersistenceError::MissingId)
        ));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_remove_missing_is_ok() {
        let repo = MemoryTagRepository::new();
        repo.remove(&stored("nope", "x", "p1")).await.unwrap();
    }

    #[tokio::test]
    async fn test_list_filters_and_sorts() {
        let repo = MemoryTagRepository::with_tags([
            stored("2", "work", "p1"),
            stored("1", "home", "p1"),
            stored("3", "games", "p2"),
        ])
        .await
        .unwrap();

        let names: Vec<_> = repo
            .list(Some("p1"))
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["home", "work"]);
        assert_eq!(repo.list(None).await.unwrap().len(), 3);
    }

    #[test]
    fn test_new_record_uses_initial_id() {
        let repo = MemoryTagRepository::new();
        let tag = repo.new_record(TagDraft::new("work", "p1"), "abc".to_string());
        assert_eq!(tag.id.as_deref(), Some("abc"));
        assert_eq!(tag.name, "work");
        assert!(!tag.is_pending_purge());
    }
}
