//! Tag record definitions
//!
//! A [`Tag`] is keyed by a content-derived id. Everything except `name` is
//! carried through reconciliation without influencing that id.

use crate::error::{Result, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Opaque per-tag attributes, kept in key order
pub type Attributes = BTreeMap<String, serde_json::Value>;

/// Trash lifecycle of a tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrashState {
    #[default]
    Active,
    Trashed,
    /// Scheduled for permanent deletion; the id must stay stable
    PendingPurge,
}

impl TrashState {
    /// Numeric code used by storage backends
    pub fn as_code(self) -> i64 {
        match self {
            TrashState::Active => 0,
            TrashState::Trashed => 1,
            TrashState::PendingPurge => 2,
        }
    }
}

impl TryFrom<i64> for TrashState {
    type Error = ValidationError;

    fn try_from(code: i64) -> std::result::Result<Self, Self::Error> {
        match code {
            0 => Ok(TrashState::Active),
            1 => Ok(TrashState::Trashed),
            2 => Ok(TrashState::PendingPurge),
            other => Err(ValidationError::invalid_parameter(
                "trash_state",
                &format!("unknown trash state code {other}"),
            )),
        }
    }
}

impl std::fmt::Display for TrashState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TrashState::Active => "active",
            TrashState::Trashed => "trashed",
            TrashState::PendingPurge => "pending-purge",
        };
        f.write_str(label)
    }
}

/// Tag record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    /// Storage key; `None` until the record is first persisted
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub profile_id: String,
    #[serde(default)]
    pub trash_state: TrashState,
    #[serde(default)]
    pub attributes: Attributes,
}

impl Tag {
    /// Create an unsaved tag record
    pub fn new(name: impl Into<String>, profile_id: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            profile_id: profile_id.into(),
            trash_state: TrashState::Active,
            attributes: Attributes::new(),
        }
    }

    /// Whether the record has never been stored
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    pub fn is_pending_purge(&self) -> bool {
        self.trash_state == TrashState::PendingPurge
    }

    /// Id of a stored record, or an error for a record that was never saved
    pub fn require_id(&self) -> Result<&str> {
        self.id
            .as_deref()
            .ok_or_else(|| crate::error::PersistenceError::MissingId.into())
    }
}

/// Request for a fresh tag, as issued once per name by batch creation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagDraft {
    pub name: String,
    pub profile_id: String,
    #[serde(default)]
    pub attributes: Attributes,
}

impl TagDraft {
    pub fn new(name: impl Into<String>, profile_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            profile_id: profile_id.into(),
            attributes: Attributes::new(),
        }
    }

    /// Attach shared attributes to the draft
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }
}

/// Changes applied to a record while it is reconciled
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagPatch {
    pub name: Option<String>,
    pub profile_id: Option<String>,
    pub trash_state: Option<TrashState>,
    #[serde(default)]
    pub attributes: Attributes,
}

impl TagPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rename(name: impl Into<String>) -> Self {
        Self::new().with_name(name)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_profile(mut self, profile_id: impl Into<String>) -> Self {
        self.profile_id = Some(profile_id.into());
        self
    }

    pub fn with_trash_state(mut self, trash_state: TrashState) -> Self {
        self.trash_state = Some(trash_state);
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    /// Whether this patch moves the record into pending purge
    pub fn is_pending_purge(&self) -> bool {
        self.trash_state == Some(TrashState::PendingPurge)
    }
}
