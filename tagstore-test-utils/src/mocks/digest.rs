//! Mock digest service for testing
//!
//! By default it delegates to the real SHA-256 word digest while recording
//! every text it was asked to digest. It can be switched to fail, to return
//! malformed output, or to return the same components for every input.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tagstore_core::error::HashingError;
use tagstore_core::{DigestAlgorithm, DigestService, Result, WordDigest};

#[derive(Debug, Clone, Default)]
enum DigestBehavior {
    #[default]
    Real,
    FailAll(String),
    FailFor(HashSet<String>),
    Empty,
    Fixed(Vec<String>),
}

/// Configurable digest double
pub struct MockDigest {
    real: WordDigest,
    behavior: Arc<Mutex<DigestBehavior>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl Default for MockDigest {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDigest {
    /// Create a mock that passes through to SHA-256
    pub fn new() -> Self {
        Self {
            real: WordDigest::new(DigestAlgorithm::Sha256),
            behavior: Arc::new(Mutex::new(DigestBehavior::Real)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Fail every digest request
    pub fn expect_failure(&mut self, message: &str) {
        *self.behavior.lock().unwrap() = DigestBehavior::FailAll(message.to_string());
    }

    /// Fail only for the given text
    pub fn expect_failure_for(&mut self, text: &str) {
        let mut behavior = self.behavior.lock().unwrap();
        match &mut *behavior {
            DigestBehavior::FailFor(texts) => {
                texts.insert(text.to_string());
            }
            other => *other = DigestBehavior::FailFor(HashSet::from([text.to_string()])),
        }
    }

    /// Return an empty component list
    pub fn expect_empty_output(&mut self) {
        *self.behavior.lock().unwrap() = DigestBehavior::Empty;
    }

    /// Return these components for every input
    pub fn expect_fixed(&mut self, components: &[&str]) {
        *self.behavior.lock().unwrap() =
            DigestBehavior::Fixed(components.iter().map(|c| c.to_string()).collect());
    }

    /// Texts digested so far, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl DigestService for MockDigest {
    fn algorithm(&self) -> &str {
        "mock"
    }

    async fn digest(&self, text: &str) -> Result<Vec<String>> {
        self.calls.lock().unwrap().push(text.to_string());
        let behavior = self.behavior.lock().unwrap().clone();

        match behavior {
            DigestBehavior::Real => self.real.digest(text).await,
            DigestBehavior::FailAll(message) => {
                Err(HashingError::digest_failed("mock", &message).into())
            }
            DigestBehavior::FailFor(texts) if texts.contains(text) => {
                Err(HashingError::digest_failed("mock", "injected failure").into())
            }
            DigestBehavior::FailFor(_) => self.real.digest(text).await,
            DigestBehavior::Empty => Ok(Vec::new()),
            DigestBehavior::Fixed(components) => Ok(components),
        }
    }
}
