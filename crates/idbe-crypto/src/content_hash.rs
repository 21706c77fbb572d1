//! MD5 content hashes for bitmap deduplication

use md5::{Digest, Md5};
use std::fmt;

/// Content hash (MD5 digest) of a bitmap's raw pixel bytes
///
/// Used only as a deduplication key. Two bitmaps with equal hashes are
/// treated as identical content unless the caller verifies the pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash([u8; 16]);

impl ContentHash {
    /// Hash raw pixel bytes
    pub fn from_data(data: &[u8]) -> Self {
        Self(Md5::digest(data).into())
    }

    /// Lowercase hex form of the digest
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
