//! Core traits for the digest collaborator

use crate::Result;
use async_trait::async_trait;

/// Deterministic digest provider used for tag identity
///
/// Implementations must be pure: the same text always yields the same
/// components in the same order.
#[async_trait]
pub trait DigestService: Send + Sync {
    /// Algorithm identifier, used in logs and errors
    fn algorithm(&self) -> &str;

    /// Digest `text` into an ordered sequence of components
    async fn digest(&self, text: &str) -> Result<Vec<String>>;
}

/// Core trait that all built-in digest algorithms implement
pub trait WordAlgorithm: Send + Sync {
    /// Unique identifier for this algorithm
    fn id(&self) -> &'static str;

    /// Digest bytes into big-endian 32-bit words
    fn digest_words(&self, data: &[u8]) -> Vec<u32>;
}
