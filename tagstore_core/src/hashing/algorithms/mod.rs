//! Digest algorithm implementations

mod sha1;
mod sha256;

pub(crate) use self::sha1::Sha1Algorithm;
pub(crate) use self::sha256::Sha256Algorithm;

/// Split a digest into big-endian 32-bit words, dropping any trailing partial word
fn to_words(bytes: &[u8]) -> Vec<u32> {
    bytes
        .chunks_exact(4)
        .map(|chunk| u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashing::traits::WordAlgorithm;

    #[test]
    fn test_to_words_big_endian() {
        assert_eq!(
            to_words(&[0x01, 0x02, 0x03, 0x04, 0xff, 0x00, 0x00, 0x01]),
            vec![0x0102_0304, 0xff00_0001]
        );
    }

    #[test]
    fn test_sha256_word_count() {
        assert_eq!(Sha256Algorithm.digest_words(b"work").len(), 8);
    }

    #[test]
    fn test_sha1_word_count() {
        assert_eq!(Sha1Algorithm.digest_words(b"work").len(), 5);
    }
}
