//! Save strategies for tag records
//!
//! [`DefaultPersistence`] applies a patch and hands the record to the
//! repository. [`crate::reconciler::TagReconciler`] wraps it to keep ids in
//! step with names.

use crate::Result;
use crate::identity::validate_name;
use crate::model::{Tag, TagPatch};
use crate::repository::TagRepository;
use crate::sanitize::escape_attributes;
use async_trait::async_trait;
use std::sync::Arc;

/// Strategy used to persist a tag record with optional changes
#[async_trait]
pub trait TagPersistence: Send + Sync {
    async fn persist(&self, record: Tag, patch: Option<&TagPatch>) -> Result<Tag>;
}

/// Apply-and-save persistence with no identity handling
#[derive(Clone)]
pub struct DefaultPersistence {
    repository: Arc<dyn TagRepository>,
    escape_attributes: bool,
}

impl DefaultPersistence {
    pub fn new(repository: Arc<dyn TagRepository>) -> Self {
        Self {
            repository,
            escape_attributes: true,
        }
    }

    /// Toggle HTML escaping of incoming attribute strings
    pub fn with_escaping(mut self, enabled: bool) -> Self {
        self.escape_attributes = enabled;
        self
    }

    pub fn repository(&self) -> &Arc<dyn TagRepository> {
        &self.repository
    }

    pub fn escapes_attributes(&self) -> bool {
        self.escape_attributes
    }

    /// Merge `patch` into `record`
    ///
    /// Only incoming attribute values are escaped, so stored values are
    /// never escaped twice.
    pub fn apply_patch(&self, record: &mut Tag, patch: &TagPatch) -> Result<()> {
        if let Some(name) = &patch.name {
            validate_name(name)?;
            record.name = name.clone();
        }
        if let Some(profile_id) = &patch.profile_id {
            record.profile_id = profile_id.clone();
        }
        if let Some(trash_state) = patch.trash_state {
            record.trash_state = trash_state;
        }

        let attributes = if self.escape_attributes {
            escape_attributes(&patch.attributes)
        } else {
            patch.attributes.clone()
        };
        record.attributes.extend(attributes);
        Ok(())
    }
}

#[async_trait]
impl TagPersistence for DefaultPersistence {
    async fn persist(&self, mut record: Tag, patch: Option<&TagPatch>) -> Result<Tag> {
        if let Some(patch) = patch {
            self.apply_patch(&mut record, patch)?;
        }
        record.require_id()?;
        self.repository.save(record).await
    }
}
