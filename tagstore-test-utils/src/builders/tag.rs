//! Builder for tag records

use serde_json::Value;
use tagstore_core::{Attributes, IdentityService, Result, Tag, TrashState};

/// Fluent builder for [`Tag`] fixtures
#[derive(Debug, Clone)]
pub struct TagBuilder {
    id: Option<String>,
    name: String,
    profile_id: String,
    trash_state: TrashState,
    attributes: Attributes,
}

impl TagBuilder {
    /// Start a builder for an unsaved tag in profile `p1`
    pub fn new(name: &str) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            profile_id: "p1".to_string(),
            trash_state: TrashState::Active,
            attributes: Attributes::new(),
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_profile(mut self, profile_id: &str) -> Self {
        self.profile_id = profile_id.to_string();
        self
    }

    pub fn with_trash_state(mut self, trash_state: TrashState) -> Self {
        self.trash_state = trash_state;
        self
    }

    pub fn with_attribute(mut self, key: &str, value: Value) -> Self {
        self.attributes.insert(key.to_string(), value);
        self
    }

    pub fn build(self) -> Tag {
        Tag {
            id: self.id,
            name: self.name,
            profile_id: self.profile_id,
            trash_state: self.trash_state,
            attributes: self.attributes,
        }
    }

    /// Build the tag with the canonical id for its name
    pub async fn build_stored(self, identity: &IdentityService) -> Result<Tag> {
        let id = identity.compute_id(&self.name).await?;
        Ok(self.with_id(&id).build())
    }
}
