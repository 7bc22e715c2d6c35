//! Repository interface for tag records
//!
//! The reconciliation layer owns no state; every record lives behind a
//! [`TagRepository`]. Individual `save`/`remove` calls are expected to be
//! atomic, but nothing here spans two calls in a transaction.

pub mod memory;

use crate::Result;
use crate::model::{Tag, TagDraft, TrashState};
use async_trait::async_trait;

pub use memory::MemoryTagRepository;

/// Storage collaborator for tags
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Build an in-memory record shell with its initial id
    fn new_record(&self, draft: TagDraft, id: String) -> Tag {
        Tag {
            id: Some(id),
            name: draft.name,
            profile_id: draft.profile_id,
            trash_state: TrashState::Active,
            attributes: draft.attributes,
        }
    }

    /// Create or update the record stored under `tag.id`
    async fn save(&self, tag: Tag) -> Result<Tag>;

    /// Delete the record stored under `tag.id`
    ///
    /// Removing an id that is not stored is not an error.
    async fn remove(&self, tag: &Tag) -> Result<()>;

    /// Find a record by id
    async fn find_by_id(&self, id: &str) -> Result<Option<Tag>>;

    /// List records ordered by name, optionally restricted to one profile
    async fn list(&self, profile_id: Option<&str>) -> Result<Vec<Tag>>;

    /// Count all records
    async fn count(&self) -> Result<u64>;
}
