//! SHA-256 word algorithm

use crate::hashing::traits::WordAlgorithm;
use sha2::{Digest, Sha256};

pub struct Sha256Algorithm;

impl WordAlgorithm for Sha256Algorithm {
    fn id(&self) -> &'static str {
        "sha256"
    }

    fn digest_words(&self, data: &[u8]) -> Vec<u32> {
        let digest = Sha256::digest(data);
        super::to_words(&digest)
    }
}
