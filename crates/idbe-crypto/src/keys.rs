//! IDBE key table
//!
//! Every IDBE blob names one of four AES-128 keys in its header. All blobs share
//! a single IV. The values were recovered from the vendor format and are
//! published widely, so they live here as constants.

use std::fmt;

use crate::error::CryptoError;

/// Number of keys a blob header may select from
pub const IDBE_KEY_COUNT: usize = 4;

/// IV shared by every IDBE blob
pub const IDBE_IV: [u8; 16] = [
    0xA4, 0x69, 0x87, 0xAE, 0x47, 0xD8, 0x2B, 0xB4, 0xFA, 0x8A, 0xBC, 0x04, 0x50, 0x28, 0x5F, 0xA4,
];

/// Key table indexed by header byte 1
pub const IDBE_KEYS: [[u8; 16]; IDBE_KEY_COUNT] = [
    [
        0x4A, 0xB9, 0xA4, 0x0E, 0x14, 0x69, 0x75, 0xA8, 0x4B, 0xB1, 0xB4, 0xF3, 0xEC, 0xEF, 0xC4,
        0x7B,
    ],
    [
        0x90, 0xA0, 0xBB, 0x1E, 0x0E, 0x86, 0x4A, 0xE8, 0x7D, 0x13, 0xA6, 0xA0, 0x3D, 0x28, 0xC9,
        0xB8,
    ],
    [
        0xFF, 0xBB, 0x57, 0xC1, 0x4E, 0x98, 0xEC, 0x69, 0x75, 0xB3, 0x84, 0xFC, 0xF4, 0x07, 0x86,
        0xB5,
    ],
    [
        0x80, 0x92, 0x37, 0x99, 0xB4, 0x1F, 0x36, 0xA6, 0xA7, 0x5F, 0xB8, 0xB4, 0x8C, 0x95, 0xF6,
        0x6F,
    ],
];

/// Parse a 128-bit key from a hex string
fn key_from_hex(hex: &str) -> Result<[u8; 16], CryptoError> {
    let hex = hex.trim();
    let bytes = hex::decode(hex)
        .map_err(|e| CryptoError::InvalidKeyFormat(format!("invalid hex: {e}")))?;

    if bytes.len() != 16 {
        return Err(CryptoError::InvalidKeySize {
            expected: 16,
            actual: bytes.len(),
        });
    }

    let mut key = [0u8; 16];
    key.copy_from_slice(&bytes);
    Ok(key)
}

/// Lookup table for IDBE keys
#[derive(Debug, Clone)]
pub struct IdbeKeyTable {
    keys: [[u8; 16]; IDBE_KEY_COUNT],
}

impl IdbeKeyTable {
    /// Create a table holding the fixed IDBE keys
    pub fn new() -> Self {
        Self { keys: IDBE_KEYS }
    }

    /// Create a table from four hex-encoded keys
    pub fn from_hex<S: AsRef<str>>(keys: [S; IDBE_KEY_COUNT]) -> Result<Self, CryptoError> {
        let mut table = [[0u8; 16]; IDBE_KEY_COUNT];
        for (slot, hex) in table.iter_mut().zip(&keys) {
            *slot = key_from_hex(hex.as_ref())?;
        }
        Ok(Self { keys: table })
    }

    /// Get a key by header index
    pub fn get(&self, index: u8) -> Option<&[u8; 16]> {
        self.keys.get(usize::from(index))
    }

    /// Number of keys in the table
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Always false; the table has a fixed size
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterate over `(index, key)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (u8, &[u8; 16])> {
        self.keys
            .iter()
            .enumerate()
            .map(|(i, key)| (i as u8, key))
    }
}

impl Default for IdbeKeyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for IdbeKeyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, key) in self.iter() {
            writeln!(f, "{index}: {}", hex::encode_upper(key))?;
        }
        Ok(())
    }
}
