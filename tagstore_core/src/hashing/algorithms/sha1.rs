//! SHA1 word algorithm

use crate::hashing::traits::WordAlgorithm;
use sha1::{Digest as Sha1Digest, Sha1};

pub struct Sha1Algorithm;

impl WordAlgorithm for Sha1Algorithm {
    fn id(&self) -> &'static str {
        "sha1"
    }

    fn digest_words(&self, data: &[u8]) -> Vec<u32> {
        let digest = Sha1::digest(data);
        super::to_words(&digest)
    }
}
