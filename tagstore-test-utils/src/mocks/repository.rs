//! Recording tag repository for testing
//!
//! Wraps a [`MemoryTagRepository`] and logs every successful call in the
//! order it happened. Failures can be injected per tag name or for all
//! removes, and a delay lets tests detect overlapping calls.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tagstore_core::error::PersistenceError;
use tagstore_core::{MemoryTagRepository, Result, Tag, TagRepository};

/// A repository call observed by [`RecordingRepository`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoOp {
    Save { id: String, name: String },
    Remove { id: String },
}

#[derive(Debug, Default)]
struct RepoBehavior {
    fail_save_names: HashSet<String>,
    fail_all_saves: bool,
    fail_removes: bool,
    delay: Duration,
}

/// Repository double that records calls and can be told to fail
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use tagstore_test_utils::RecordingRepository;
///
/// let mut repo = RecordingRepository::new();
/// repo.expect_save_failure_for("broken");
/// let repo = Arc::new(repo);
/// ```
#[derive(Debug, Default)]
pub struct RecordingRepository {
    inner: MemoryTagRepository,
    ops: Arc<Mutex<Vec<RepoOp>>>,
    behavior: Arc<Mutex<RepoBehavior>>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl RecordingRepository {
    /// Create an empty recording repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every save of a tag with this name
    pub fn expect_save_failure_for(&mut self, name: &str) {
        let mut behavior = self.behavior.lock().unwrap();
        behavior.fail_save_names.insert(name.to_string());
    }

    /// Fail every save
    pub fn expect_save_failure(&mut self) {
        self.behavior.lock().unwrap().fail_all_saves = true;
    }

    /// Fail every remove
    pub fn expect_remove_failure(&mut self) {
        self.behavior.lock().unwrap().fail_removes = true;
    }

    /// Hold each call for `delay` before completing it
    pub fn set_delay(&mut self, delay: Duration) {
        self.behavior.lock().unwrap().delay = delay;
    }

    /// Store a record directly, without logging it
    pub async fn seed(&self, tag: Tag) -> Result<Tag> {
        self.inner.save(tag).await
    }

    /// Successful calls in the order they completed
    pub fn ops(&self) -> Vec<RepoOp> {
        self.ops.lock().unwrap().clone()
    }

    /// Names of successfully saved tags, in order
    pub fn saved_names(&self) -> Vec<String> {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                RepoOp::Save { name, .. } => Some(name),
                RepoOp::Remove { .. } => None,
            })
            .collect()
    }

    /// Highest number of calls that were running at the same time
    pub fn max_concurrent_calls(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn enter(&self) {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let delay = self.behavior.lock().unwrap().delay;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    fn leave(&self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }

    fn record(&self, op: RepoOp) {
        self.ops.lock().unwrap().push(op);
    }
}

#[async_trait]
impl TagRepository for RecordingRepository {
    async fn save(&self, tag: Tag) -> Result<Tag> {
        self.enter().await;
        let should_fail = {
            let behavior = self.behavior.lock().unwrap();
            behavior.fail_all_saves || behavior.fail_save_names.contains(&tag.name)
        };

        let result = if should_fail {
            Err(PersistenceError::save_failed(
                tag.id.as_deref().unwrap_or_default(),
                "injected save failure",
            )
            .into())
        } else {
            self.inner.save(tag).await
        };

        if let Ok(saved) = &result {
            self.record(RepoOp::Save {
                id: saved.id.clone().unwrap_or_default(),
                name: saved.name.clone(),
            });
        }
        self.leave();
        result
    }

    async fn remove(&self, tag: &Tag) -> Result<()> {
        self.enter().await;
        let should_fail = self.behavior.lock().unwrap().fail_removes;

        let result = if should_fail {
            Err(PersistenceError::remove_failed(
                tag.id.as_deref().unwrap_or_default(),
                "injected remove failure",
            )
            .into())
        } else {
            self.inner.remove(tag).await
        };

        if result.is_ok() {
            self.record(RepoOp::Remove {
                id: tag.id.clone().unwrap_or_default(),
            });
        }
        self.leave();
        result
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Tag>> {
        self.inner.find_by_id(id).await
    }

    async fn list(&self, profile_id: Option<&str>) -> Result<Vec<Tag>> {
        self.inner.list(profile_id).await
    }

    async fn count(&self) -> Result<u64> {
        self.inner.count().await
    }
}
