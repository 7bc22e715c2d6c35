//! Tagstore Core Library
//!
//! Content-addressed tag records: ids derived from tag names, rename
//! migration between ids, and ordered batch creation over a pluggable
//! repository.

pub mod api;
pub mod batch;
#[cfg(feature = "database")]
pub mod database;
pub mod error;
pub mod hashing;
pub mod identity;
pub mod model;
pub mod persistence;
pub mod reconciler;
pub mod repository;
pub mod sanitize;

// Re-export main types
pub use api::TagStore;
pub use batch::{BatchReport, BatchTagCreator, FailurePolicy, TagOutcome};
#[cfg(feature = "database")]
pub use database::{Database, SqliteTagRepository};
pub use error::{Error, Result};
pub use hashing::{DigestAlgorithm, DigestService, WordDigest, digest_service};
pub use identity::IdentityService;
pub use model::{Attributes, Tag, TagDraft, TagPatch, TrashState};
pub use persistence::{DefaultPersistence, TagPersistence};
pub use reconciler::TagReconciler;
pub use repository::{MemoryTagRepository, TagRepository};

/// Core tag service configuration
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TagConfig {
    pub failure_policy: FailurePolicy,
    pub digest_algorithm: DigestAlgorithm,
    pub escape_attributes: bool,
}

impl Default for TagConfig {
    fn default() -> Self {
        Self {
            failure_policy: FailurePolicy::FailFast,
            digest_algorithm: DigestAlgorithm::Sha256,
            escape_attributes: true,
        }
    }
}

impl TagConfig {
    /// Create a test configuration
    pub fn test() -> Self {
        Self {
            failure_policy: FailurePolicy::BestEffort,
            digest_algorithm: DigestAlgorithm::Sha256,
            escape_attributes: false,
        }
    }
}
