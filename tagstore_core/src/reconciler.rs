//! Tag reconciliation
//!
//! Keeps a record stored under the id derived from its name. A rename moves
//! the record: the copy under the old id is removed first, then the record
//! is saved under the new id. The two calls are not transactional; if the
//! save fails after a successful remove, the tag is absent until the caller
//! retries.
//!
//! Records moving into pending purge keep whatever id they already have.

use crate::Result;
use crate::identity::{IdentityService, validate_name};
use crate::model::{Tag, TagDraft, TagPatch, TrashState};
use crate::persistence::{DefaultPersistence, TagPersistence};
use crate::repository::TagRepository;
use crate::sanitize::escape_attributes;
use crate::TagConfig;
use async_trait::async_trait;
use std::sync::Arc;

/// Reconciles tag records against their canonical ids
#[derive(Clone)]
pub struct TagReconciler {
    identity: IdentityService,
    persistence: DefaultPersistence,
}

impl TagReconciler {
    pub fn new(identity: IdentityService, repository: Arc<dyn TagRepository>) -> Self {
        Self {
            identity,
            persistence: DefaultPersistence::new(repository),
        }
    }

    /// Create a reconciler honoring the attribute escaping setting in `config`
    pub fn with_config(
        identity: IdentityService,
        repository: Arc<dyn TagRepository>,
        config: &TagConfig,
    ) -> Self {
        Self {
            identity,
            persistence: DefaultPersistence::new(repository)
                .with_escaping(config.escape_attributes),
        }
    }

    pub fn identity(&self) -> &IdentityService {
        &self.identity
    }

    pub fn repository(&self) -> &Arc<dyn TagRepository> {
        self.persistence.repository()
    }

    /// Store `record` under the id matching its (possibly patched) name
    pub async fn reconcile(&self, record: Tag, patch: Option<TagPatch>) -> Result<Tag> {
        self.persist(record, patch.as_ref()).await
    }

    /// Create a fresh record for `draft`
    ///
    /// The id is computed once and becomes the record's initial id, so a
    /// new record never goes through rename migration.
    pub async fn create(&self, mut draft: TagDraft) -> Result<Tag> {
        let id = self.identity.compute_id(&draft.name).await?;
        if self.persistence.escapes_attributes() {
            draft.attributes = escape_attributes(&draft.attributes);
        }

        let record = self.repository().new_record(draft, id);
        self.persistence.persist(record, None).await
    }

    pub async fn rename(&self, record: Tag, name: &str) -> Result<Tag> {
        self.reconcile(record, Some(TagPatch::rename(name))).await
    }

    pub async fn trash(&self, record: Tag) -> Result<Tag> {
        self.set_trash_state(record, TrashState::Trashed).await
    }

    pub async fn restore(&self, record: Tag) -> Result<Tag> {
        self.set_trash_state(record, TrashState::Active).await
    }

    pub async fn mark_for_purge(&self, record: Tag) -> Result<Tag> {
        self.set_trash_state(record, TrashState::PendingPurge).await
    }

    async fn set_trash_state(&self, record: Tag, trash_state: TrashState) -> Result<Tag> {
        self.reconcile(record, Some(TagPatch::new().with_trash_state(trash_state)))
            .await
    }
}

#[async_trait]
impl TagPersistence for TagReconciler {
    async fn persist(&self, mut record: Tag, patch: Option<&TagPatch>) -> Result<Tag> {
        if let Some(patch) = patch.filter(|p| p.is_pending_purge()) {
            // Only the id is left alone; the name must still be valid
            validate_name(patch.name.as_deref().unwrap_or(&record.name))?;
            log::debug!(
                "Tag {:?} is pending purge, keeping id {:?}",
                record.name,
                record.id
            );
            return self.persistence.persist(record, Some(patch)).await;
        }

        let name = patch
            .and_then(|p| p.name.as_deref())
            .unwrap_or(&record.name);
        let target_id = self.identity.compute_id(name).await?;

        if let Some(current_id) = record.id.as_deref()
            && current_id != target_id
        {
            log::debug!("Tag renamed to {name:?}, moving {current_id} -> {target_id}");
            self.repository().remove(&record).await?;
        }

        record.id = Some(target_id);
        self.persistence.persist(record, patch).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashing::{DigestAlgorithm, digest_service};
    use crate::repository::MemoryTagRepository;

    fn reconciler() -> (TagReconciler, Arc<MemoryTagRepository>) {
        let repo = Arc::new(MemoryTagRepository::new());
        let identity = IdentityService::new(digest_service(DigestAlgorithm::Sha256));
        (TagReconciler::new(identity, repo.clone()), repo)
    }

    #[tokio::test]
    async fn test_new_record_gets_canonical_id() {
        let (reconciler, repo) = reconciler();

        let saved = reconciler
            .reconcile(Tag::new("work", "p1"), None)
            .await
            .unwrap();

        let expected = reconciler.identity().compute_id("work").await.unwrap();
        assert_eq!(saved.id.as_deref(), Some(expected.as_str()));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_rename_moves_record() {
        let (reconciler, repo) = reconciler();
        let alpha = reconciler
            .create(TagDraft::new("alpha", "p1"))
            .await
            .unwrap();
        let old_id = alpha.id.clone().unwrap();

        let beta = reconciler.rename(alpha, "beta").await.unwrap();

        assert!(repo.find_by_id(&old_id).await.unwrap().is_none());
        let new_id = reconciler.identity().compute_id("beta").await.unwrap();
        assert_eq!(beta.id.as_deref(), Some(new_id.as_str()));
        let stored = repo.find_by_id(&new_id).await.unwrap().unwrap();
        assert_eq!(stored.name, "beta");
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_pending_purge_keeps_id() {
        let (reconciler, repo) = reconciler();
        let alpha = reconciler
            .create(TagDraft::new("alpha", "p1"))
            .await
            .unwrap();
        let id = alpha.id.clone().unwrap();

        let patch = TagPatch::rename("gamma").with_trash_state(TrashState::PendingPurge);
        let purged = reconciler.reconcile(alpha, Some(patch)).await.unwrap();

        assert_eq!(purged.id.as_deref(), Some(id.as_str()));
        assert_eq!(purged.trash_state, TrashState::PendingPurge);
        assert!(repo.find_by_id(&id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_trash_and_restore_keep_id() {
        let (reconciler, _repo) = reconciler();
        let tag = reconciler
            .create(TagDraft::new("alpha", "p1"))
            .await
            .unwrap();
        let id = tag.id.clone();

        let trashed = reconciler.trash(tag).await.unwrap();
        assert_eq!(trashed.trash_state, TrashState::Trashed);
        assert_eq!(trashed.id, id);

        let restored = reconciler.restore(trashed).await.unwrap();
        assert_eq!(restored.trash_state, TrashState::Active);
        assert_eq!(restored.id, id);
    }
}
