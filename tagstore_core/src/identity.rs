//! Canonical tag identifiers
//!
//! A tag's id depends on its name and nothing else. Two profiles that both
//! own a tag called "work" therefore share one id; callers that need
//! per-profile isolation must arrange it above this layer.

use crate::error::{HashingError, Result, ValidationError};
use crate::hashing::DigestService;
use std::sync::Arc;

/// Reject names that cannot seed an identifier
pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::invalid_name(name, "name must not be empty").into());
    }
    Ok(())
}

/// Derives canonical ids from tag names
#[derive(Clone)]
pub struct IdentityService {
    digest: Arc<dyn DigestService>,
}

impl IdentityService {
    pub fn new(digest: Arc<dyn DigestService>) -> Self {
        Self { digest }
    }

    /// Compute the canonical id for `name`
    ///
    /// The digest components are joined without a separator. An empty
    /// component list, or an empty component, is treated as a digest failure.
    pub async fn compute_id(&self, name: &str) -> Result<String> {
        validate_name(name)?;

        let components = self.digest.digest(name).await?;
        if components.is_empty() {
            return Err(HashingError::malformed(format!(
                "{} returned no components",
                self.digest.algorithm()
            ))
            .into());
        }
        if let Some(position) = components.iter().position(|c| c.is_empty()) {
            return Err(HashingError::malformed(format!(
                "{} returned an empty component at position {position}",
                self.digest.algorithm()
            ))
            .into());
        }

        let id = components.concat();
        log::debug!("Computed tag id {id} for name {name:?}");
        Ok(id)
    }
}

impl std::fmt::Debug for IdentityService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityService")
            .field("algorithm", &self.digest.algorithm())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::hashing::{DigestAlgorithm, digest_service};
    use async_trait::async_trait;

    struct FixedDigest(Vec<String>);

    #[async_trait]
    impl DigestService for FixedDigest {
        fn algorithm(&self) -> &str {
            "fixed"
        }

        async fn digest(&self, _text: &str) -> Result<Vec<String>> {
            Ok(self.0.clone())
        }
    }

    fn identity() -> IdentityService {
        IdentityService::new(digest_service(DigestAlgorithm::Sha256))
    }

    #[tokio::test]
    async fn test_components_joined_without_separator() {
        let service = IdentityService::new(Arc::new(FixedDigest(vec![
            "ab".to_string(),
            "-12".to_string(),
            "cd".to_string(),
        ])));

        assert_eq!(service.compute_id("work").await.unwrap(), "ab-12cd");
    }

    #[tokio::test]
    async fn test_compute_id_matches_hex_digest() {
        let id = identity().compute_id("abc").await.unwrap();
        assert_eq!(
            id,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[tokio::test]
    async fn test_empty_name_rejected() {
        let error = identity().compute_id("").await.unwrap_err();
        assert!(matches!(
            error,
            Error::Validation(ValidationError::InvalidName { .. })
        ));

        let error = identity().compute_id("   ").await.unwrap_err();
        assert!(error.is_validation());
    }

    #[tokio::test]
    async fn test_no_components_is_malformed() {
        let service = IdentityService::new(Arc::new(FixedDigest(vec![])));
        let error = service.compute_id("work").await.unwrap_err();
        assert!(matches!(
            error,
            Error::Hashing(HashingError::MalformedDigest { .. })
        ));
    }

    #[tokio::test]
    async fn test_empty_component_is_malformed() {
        let service =
            IdentityService::new(Arc::new(FixedDigest(vec!["ab".to_string(), String::new()])));
        let error = service.compute_id("work").await.unwrap_err();
        assert!(error.to_string().contains("position 1"));
    }
}
