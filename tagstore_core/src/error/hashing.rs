//! Digest collaborator error types

use thiserror::Error;

/// Errors raised while deriving a digest for a tag name
#[derive(Error, Debug)]
pub enum HashingError {
    /// The digest service failed to produce a digest
    #[error("Digest failed for algorithm '{algorithm}': {message}")]
    DigestFailed { algorithm: String, message: String },

    /// The digest service returned output that cannot form an identifier
    #[error("Malformed digest output: {reason}")]
    MalformedDigest { reason: String },
}

impl HashingError {
    /// Create a digest failure error
    pub fn digest_failed(algorithm: &str, message: &str) -> Self {
        Self::DigestFailed {
            algorithm: algorithm.to_string(),
            message: message.to_string(),
        }
    }

    /// Create a malformed digest error
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedDigest {
            reason: reason.into(),
        }
    }
}
