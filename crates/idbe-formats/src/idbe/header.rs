//! IDBE blob header

use binrw::io::Cursor;
use binrw::{BinRead, BinWrite};
use idbe_crypto::IdbeKeyTable;

use super::error::{IdbeError, IdbeResult};

/// Size of the cleartext header preceding the ciphertext
pub const HEADER_SIZE: usize = 2;

/// Cleartext header of an IDBE blob
#[derive(Debug, Clone, Copy, PartialEq, Eq, BinRead, BinWrite)]
#[brw(little)]
pub struct IdbeHeader {
    /// Format byte, carried through untouched
    pub format: u8,
    /// Index into the IDBE key table
    pub key_index: u8,
}

impl IdbeHeader {
    /// Create a header selecting `key_index`
    pub fn new(format: u8, key_index: u8) -> Self {
        Self { format, key_index }
    }

    /// Read the header from the start of a blob
    pub fn parse(blob: &[u8]) -> IdbeResult<Self> {
        if blob.len() < HEADER_SIZE {
            return Err(IdbeError::BlobTooShort {
                expected: HEADER_SIZE,
                actual: blob.len(),
            });
        }
        let mut cursor = Cursor::new(&blob[..HEADER_SIZE]);
        Ok(Self::read(&mut cursor)?)
    }

    /// Resolve the selected key
    pub fn key<'a>(&self, keys: &'a IdbeKeyTable) -> IdbeResult<&'a [u8; 16]> {
        keys.get(self.key_index)
            .ok_or(IdbeError::UnknownKeyIndex(self.key_index))
    }

    /// Header bytes as written to a blob
    pub fn to_bytes(self) -> [u8; HEADER_SIZE] {
        [self.format, self.key_index]
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header() {
        let header = IdbeHeader::parse(&[0x00, 0x02, 0xAA, 0xBB]).expect("two bytes present");
        assert_eq!(header, IdbeHeader::new(0, 2));
        assert_eq!(header.to_bytes(), [0x00, 0x02]);
    }

    #[test]
    fn test_short_blob() {
        assert!(matches!(
            IdbeHeader::parse(&[0x00]),
            Err(IdbeError::BlobTooShort {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_key_selection() {
        let keys = IdbeKeyTable::new();
        for index in 0..4 {
            let header = IdbeHeader::new(0, index);
            assert_eq!(
                header.key(&keys).expect("in range"),
                &idbe_crypto::keys::IDBE_KEYS[usize::from(index)]
            );
        }
        assert!(matches!(
            IdbeHeader::new(0, 4).key(&keys),
            Err(IdbeError::UnknownKeyIndex(4))
        ));
    }
}
