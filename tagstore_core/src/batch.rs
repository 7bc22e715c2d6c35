//! Ordered batch creation of tags
//!
//! Names are created strictly one after another: item `i + 1` is not started
//! until item `i` has finished. Two names in one batch can resolve to the
//! same id, and nothing below this layer arbitrates concurrent writes to it.

use crate::error::{BatchError, Error, Result, ValidationError};
use crate::model::{Attributes, Tag, TagDraft};
use crate::reconciler::TagReconciler;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// What a batch does when one of its names fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop at the first failure; earlier creations stay in place
    #[default]
    FailFast,
    /// Attempt every name and report each outcome
    BestEffort,
}

/// Outcome of creating one tag
#[derive(Debug)]
pub struct TagOutcome {
    pub name: String,
    pub result: Result<Tag>,
}

/// Result of a batch run
#[derive(Debug)]
pub struct BatchReport {
    /// One outcome per attempted name, in input order
    pub outcomes: Vec<TagOutcome>,
    pub total_time: Duration,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// True only when every name was created
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// Tags that were created, in input order
    pub fn created(&self) -> Vec<&Tag> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok())
            .collect()
    }

    /// Names that failed together with their errors
    pub fn failures(&self) -> Vec<(&str, &Error)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.name.as_str(), e)))
            .collect()
    }
}

/// Creates one tag per name, in order
#[derive(Clone)]
pub struct BatchTagCreator {
    reconciler: Arc<TagReconciler>,
    policy: FailurePolicy,
}

impl BatchTagCreator {
    pub fn new(reconciler: Arc<TagReconciler>) -> Self {
        Self {
            reconciler,
            policy: FailurePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Create a tag for each of `names` under `profile_id`
    ///
    /// With [`FailurePolicy::FailFast`] the first failure aborts the batch
    /// and is returned as [`BatchError::Aborted`]; tags created before it
    /// remain stored. With [`FailurePolicy::BestEffort`] every name is
    /// attempted and the report carries each failure.
    pub async fn add_tags<S>(
        &self,
        profile_id: &str,
        names: &[S],
        shared: &Attributes,
    ) -> Result<BatchReport>
    where
        S: AsRef<str> + Sync,
    {
        if profile_id.trim().is_empty() {
            return Err(ValidationError::missing_field("profile_id").into());
        }

        let start = Instant::now();
        let mut outcomes = Vec::with_capacity(names.len());

        for (position, name) in names.iter().enumerate() {
            let name = name.as_ref();
            log::debug!("Creating tag {}/{}: {name:?}", position + 1, names.len());

            let result = self.create_tag(profile_id, name, shared).await;
            if let Err(error) = &result {
                log::warn!("Failed to create tag {name:?}: {error}");
            }

            match (self.policy, result) {
                (FailurePolicy::FailFast, Err(error)) => {
                    return Err(BatchError::aborted(name, position, outcomes.len(), error).into());
                }
                (_, result) => outcomes.push(TagOutcome {
                    name: name.to_string(),
                    result,
                }),
            }
        }

        Ok(BatchReport {
            outcomes,
            total_time: start.elapsed(),
        })
    }

    /// Create a single tag from `name` plus the shared attributes
    pub async fn create_tag(
        &self,
        profile_id: &str,
        name: &str,
        shared: &Attributes,
    ) -> Result<Tag> {
        let draft = TagDraft::new(name, profile_id).with_attributes(shared.clone());
        self.reconciler.create(draft).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashing::{DigestAlgorithm, digest_service};
    use crate::identity::IdentityService;
    use crate::repository::{MemoryTagRepository, TagRepository};
    use serde_json::json;

    fn creator() -> (BatchTagCreator, Arc<MemoryTagRepository>) {
        let repo = Arc::new(MemoryTagRepository::new());
        let identity = IdentityService::new(digest_service(DigestAlgorithm::Sha256));
        let reconciler = Arc::new(TagReconciler::new(identity, repo.clone()));
        (BatchTagCreator::new(reconciler), repo)
    }

    #[tokio::test]
    async fn test_add_tags_creates_each_name() {
        let (creator, repo) = creator();

        let report = creator
            .add_tags("p1", &["work", "home"], &Attributes::new())
            .await
            .unwrap();

        assert!(report.is_success());
        assert_eq!(report.succeeded(), 2);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_shared_attributes_are_attached() {
        let (creator, _repo) = creator();
        let mut shared = Attributes::new();
        shared.insert("color".to_string(), json!("blue"));

        let report = creator
            .add_tags("p1", &["work"], &shared)
            .await
            .unwrap();

        assert_eq!(report.created()[0].attributes["color"], json!("blue"));
    }

    #[tokio::test]
    async fn test_fail_fast_stops_at_first_error() {
        let (creator, repo) = creator();

        let error = creator
            .add_tags("p1", &["a", "", "c"], &Attributes::new())
            .await
            .unwrap_err();

        match error {
            Error::Batch(BatchError::Aborted {
                position,
                completed,
                ..
            }) => {
                assert_eq!(position, 1);
                assert_eq!(completed, 1);
            }
            other => panic!("Expected aborted batch, got {other:?}"),
        }
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_best_effort_reports_every_name() {
        let (creator, repo) = creator();
        let creator = creator.with_policy(FailurePolicy::BestEffort);

        let report = creator
            .add_tags("p1", &["a", "", "c"], &Attributes::new())
            .await
            .unwrap();

        assert_eq!(report.outcomes.len(), 3);
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
        assert!(!report.is_success());
        assert_eq!(report.failures()[0].0, "");
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_empty_batch_is_success() {
        let (creator, _repo) = creator();
        let names: [&str; 0] = [];
        let report = creator
            .add_tags("p1", &names, &Attributes::new())
            .await
            .unwrap();
        assert!(report.is_success());
        assert!(report.outcomes.is_empty());
    }

    #[tokio::test]
    async fn test_missing_profile_rejected() {
        let (creator, repo) = creator();
        let error = creator
            .add_tags("", &["work"], &Attributes::new())
            .await
            .unwrap_err();
        assert!(error.is_validation());
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
