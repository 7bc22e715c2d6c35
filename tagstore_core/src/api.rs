//! High-level entry point wiring the tag services together
//!
//! [`TagStore`] builds the identity service, reconciler and batch creator
//! from a [`TagConfig`] and an injected repository. Nothing is looked up
//! through global state.

use crate::{
    Result, TagConfig,
    batch::{BatchReport, BatchTagCreator},
    error::ValidationError,
    hashing::{DigestService, digest_service},
    identity::IdentityService,
    model::{Attributes, Tag, TagPatch},
    reconciler::TagReconciler,
    repository::TagRepository,
};
use std::sync::Arc;

/// Tag service facade
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use tagstore_core::{Attributes, MemoryTagRepository, TagConfig, TagStore};
///
/// # async fn example() -> tagstore_core::Result<()> {
/// let store = TagStore::new(TagConfig::default(), Arc::new(MemoryTagRepository::new()));
/// let report = store.add_tags("p1", &["work", "home"], &Attributes::new()).await?;
/// assert_eq!(report.succeeded(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct TagStore {
    config: TagConfig,
    reconciler: Arc<TagReconciler>,
    batch: BatchTagCreator,
}

impl TagStore {
    /// Create a store using the configured built-in digest
    pub fn new(config: TagConfig, repository: Arc<dyn TagRepository>) -> Self {
        let digest = digest_service(config.digest_algorithm);
        Self::with_digest(config, repository, digest)
    }

    /// Create a store with an explicit digest collaborator
    pub fn with_digest(
        config: TagConfig,
        repository: Arc<dyn TagRepository>,
        digest: Arc<dyn DigestService>,
    ) -> Self {
        let identity = IdentityService::new(digest);
        let reconciler = Arc::new(TagReconciler::with_config(identity, repository, &config));
        let batch = BatchTagCreator::new(reconciler.clone()).with_policy(config.failure_policy);

        Self {
            config,
            reconciler,
            batch,
        }
    }

    pub fn config(&self) -> &TagConfig {
        &self.config
    }

    pub fn reconciler(&self) -> &TagReconciler {
        &self.reconciler
    }

    pub fn repository(&self) -> &Arc<dyn TagRepository> {
        self.reconciler.repository()
    }

    /// Canonical id for a tag name
    pub async fn compute_id(&self, name: &str) -> Result<String> {
        self.reconciler.identity().compute_id(name).await
    }

    /// Look a tag up by name through its canonical id
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Tag>> {
        let id = self.compute_id(name).await?;
        self.repository().find_by_id(&id).await
    }

    /// Fetch a stored tag by name, failing if it does not exist
    pub async fn require_by_name(&self, name: &str) -> Result<Tag> {
        self.find_by_name(name)
            .await?
            .ok_or_else(|| ValidationError::invalid_name(name, "no tag with this name").into())
    }

    pub async fn reconcile(&self, record: Tag, patch: Option<TagPatch>) -> Result<Tag> {
        self.reconciler.reconcile(record, patch).await
    }

    pub async fn add_tags<S>(
        &self,
        profile_id: &str,
        names: &[S],
        shared: &Attributes,
    ) -> Result<BatchReport>
    where
        S: AsRef<str> + Sync,
    {
        self.batch.add_tags(profile_id, names, shared).await
    }

    /// Rename the stored tag called `from`
    pub async fn rename(&self, from: &str, to: &str) -> Result<Tag> {
        let tag = self.require_by_name(from).await?;
        self.reconciler.rename(tag, to).await
    }

    pub async fn trash(&self, name: &str) -> Result<Tag> {
        let tag = self.require_by_name(name).await?;
        self.reconciler.trash(tag).await
    }

    pub async fn restore(&self, name: &str) -> Result<Tag> {
        let tag = self.require_by_name(name).await?;
        self.reconciler.restore(tag).await
    }

    /// Flag the stored tag for purging; its id is left untouched
    pub async fn mark_for_purge(&self, name: &str) -> Result<Tag> {
        let tag = self.require_by_name(name).await?;
        self.reconciler.mark_for_purge(tag).await
    }

    pub async fn list(&self, profile_id: Option<&str>) -> Result<Vec<Tag>> {
        self.repository().list(profile_id).await
    }
}
