//! Digest functionality used to derive tag identifiers
//!
//! The built-in [`WordDigest`] renders a digest as a sequence of 32-bit words
//! in lowercase hex, so joining the components yields the conventional hex
//! digest of the text.

use crate::{Error, Result, error::ValidationError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

mod algorithms;
mod traits;

pub use traits::{DigestService, WordAlgorithm};

/// Digest algorithms available to [`WordDigest`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    #[default]
    Sha256,
    Sha1,
}

impl DigestAlgorithm {
    fn to_impl(self) -> Arc<dyn WordAlgorithm> {
        match self {
            DigestAlgorithm::Sha256 => Arc::new(algorithms::Sha256Algorithm),
            DigestAlgorithm::Sha1 => Arc::new(algorithms::Sha1Algorithm),
        }
    }
}

impl std::fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DigestAlgorithm::Sha256 => write!(f, "sha256"),
            DigestAlgorithm::Sha1 => write!(f, "sha1"),
        }
    }
}

impl std::str::FromStr for DigestAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "sha256" => Ok(DigestAlgorithm::Sha256),
            "sha1" => Ok(DigestAlgorithm::Sha1),
            _ => Err(Error::Validation(ValidationError::invalid_configuration(
                &format!("Unknown digest algorithm: {s}"),
            ))),
        }
    }
}

/// Digest service returning hex-encoded 32-bit words
pub struct WordDigest {
    algorithm: Arc<dyn WordAlgorithm>,
}

impl WordDigest {
    pub fn new(algorithm: DigestAlgorithm) -> Self {
        Self {
            algorithm: algorithm.to_impl(),
        }
    }
}

impl Default for WordDigest {
    fn default() -> Self {
        Self::new(DigestAlgorithm::default())
    }
}

#[async_trait]
impl DigestService for WordDigest {
    fn algorithm(&self) -> &str {
        self.algorithm.id()
    }

    async fn digest(&self, text: &str) -> Result<Vec<String>> {
        Ok(self
            .algorithm
            .digest_words(text.as_bytes())
            .into_iter()
            .map(|word| format!("{word:08x}"))
            .collect())
    }
}

/// Build the shared digest service for an algorithm
pub fn digest_service(algorithm: DigestAlgorithm) -> Arc<dyn DigestService> {
    Arc::new(WordDigest::new(algorithm))
}
