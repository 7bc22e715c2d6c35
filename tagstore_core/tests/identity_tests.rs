//! Identity derivation tests
//!
//! Ids must be a pure function of the tag name.

use proptest::prelude::*;
use std::sync::Arc;
use tagstore_core::{DigestAlgorithm, IdentityService, digest_service};
use tagstore_test_utils::MockDigest;

fn identity() -> IdentityService {
    IdentityService::new(digest_service(DigestAlgorithm::Sha256))
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn prop_compute_id_is_deterministic(name in "[a-zA-Z0-9 _-]{0,16}[a-zA-Z0-9]") {
        let rt = runtime();
        let service = identity();
        let first = rt.block_on(service.compute_id(&name)).unwrap();
        let second = rt.block_on(service.compute_id(&name)).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_distinct_names_get_distinct_ids(
        a in "[a-z]{1,12}",
        b in "[a-z]{1,12}",
    ) {
        prop_assume!(a != b);
        let rt = runtime();
        let service = identity();
        let id_a = rt.block_on(service.compute_id(&a)).unwrap();
        let id_b = rt.block_on(service.compute_id(&b)).unwrap();
        prop_assert_ne!(id_a, id_b);
    }
}

#[tokio::test]
async fn test_id_is_hex_sha256_of_name() {
    let id = identity().compute_id("work").await.unwrap();
    assert_eq!(id.len(), 64);
    assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
}

#[tokio::test]
async fn test_algorithms_give_different_ids() {
    let sha256 = identity().compute_id("work").await.unwrap();
    let sha1 = IdentityService::new(digest_service(DigestAlgorithm::Sha1))
        .compute_id("work")
        .await
        .unwrap();

    assert_eq!(sha1.len(), 40);
    assert_ne!(sha256, sha1);
}

#[tokio::test]
async fn test_invalid_name_never_reaches_digest() {
    let digest = Arc::new(MockDigest::new());
    let service = IdentityService::new(digest.clone());

    assert!(service.compute_id("").await.is_err());
    assert_eq!(digest.call_count(), 0);
}

#[tokio::test]
async fn test_digest_failure_propagates() {
    let mut digest = MockDigest::new();
    digest.expect_failure("backend down");
    let service = IdentityService::new(Arc::new(digest));

    let error = service.compute_id("work").await.unwrap_err();
    assert!(error.to_string().contains("backend down"));
}
