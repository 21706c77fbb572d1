//! AES-128-CBC for IDBE payloads
//!
//! IDBE payloads are encrypted without padding: the plaintext is always a
//! whole number of blocks, so both directions reject ragged input instead of
//! padding or unpadding it.

use aes::Aes128;
use cipher::block_padding::NoPadding;
use cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};

use crate::error::CryptoError;

type Aes128CbcDec = ::cbc::Decryptor<Aes128>;
type Aes128CbcEnc = ::cbc::Encryptor<Aes128>;

/// AES block size in bytes
pub const AES_BLOCK_SIZE: usize = 16;

/// Decrypt `data` with AES-128-CBC
///
/// # Arguments
/// * `data` - Ciphertext, a multiple of 16 bytes
/// * `key` - 16-byte key
/// * `iv` - 16-byte initialization vector
pub fn decrypt_aes_cbc(data: &[u8], key: &[u8; 16], iv: &[u8; 16]) -> Result<Vec<u8>, CryptoError> {
    if data.len() % AES_BLOCK_SIZE != 0 {
        return Err(CryptoError::InvalidCiphertextLength(data.len()));
    }

    let mut output = data.to_vec();
    Aes128CbcDec::new(key.into(), iv.into())
        .decrypt_padded_mut::<NoPadding>(&mut output)
        .map_err(|_| CryptoError::InvalidCiphertextLength(data.len()))?;
    Ok(output)
}

/// Encrypt `data` with AES-128-CBC
///
/// # Arguments
/// * `data` - Plaintext, a multiple of 16 bytes
/// * `key` - 16-byte key
/// * `iv` - 16-byte initialization vector
pub fn encrypt_aes_cbc(data: &[u8], key: &[u8; 16], iv: &[u8; 16]) -> Result<Vec<u8>, CryptoError> {
    if data.len() % AES_BLOCK_SIZE != 0 {
        return Err(CryptoError::InvalidPlaintextLength(data.len()));
    }

    let mut output = data.to_vec();
    let len = output.len();
    Aes128CbcEnc::new(key.into(), iv.into())
        .encrypt_padded_mut::<NoPadding>(&mut output, len)
        .map_err(|_| CryptoError::InvalidPlaintextLength(len))?;
    Ok(output)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::keys::{IDBE_IV, IDBE_KEYS};
    use proptest::prelude::*;

    #[test]
    fn test_aes_cbc_round_trip() {
        let key = IDBE_KEYS[2];
        let plaintext = *b"icon payloads are block aligned!";

        let ciphertext = encrypt_aes_cbc(&plaintext, &key, &IDBE_IV).expect("aligned input");
        assert_ne!(&ciphertext[..], &plaintext[..]);

        let decrypted = decrypt_aes_cbc(&ciphertext, &key, &IDBE_IV).expect("aligned input");
        assert_eq!(&decrypted[..], &plaintext[..]);
    }

    #[test]
    fn test_fips197_vector() {
        // FIPS-197 C.1 with a zero IV reduces CBC to a single ECB block
        let key: [u8; 16] = core::array::from_fn(|i| i as u8);
        let plaintext: [u8; 16] = core::array::from_fn(|i| (i as u8) * 0x11);
        let ciphertext = encrypt_aes_cbc(&plaintext, &key, &[0; 16]).expect("one block");
        assert_eq!(hex::encode(ciphertext), "69c4e0d86a7b0430d8cdb78070b4c55a");
    }

    #[test]
    fn test_chaining_changes_later_blocks() {
        let key = IDBE_KEYS[0];
        let ciphertext = encrypt_aes_cbc(&[0u8; 32], &key, &IDBE_IV).expect("two blocks");
        assert_ne!(ciphertext[..16], ciphertext[16..]);
    }

    #[test]
    fn test_ragged_input_rejected() {
        let key = IDBE_KEYS[1];
        assert_eq!(
            decrypt_aes_cbc(&[0u8; 17], &key, &IDBE_IV),
            Err(CryptoError::InvalidCiphertextLength(17))
        );
        assert_eq!(
            encrypt_aes_cbc(&[0u8; 15], &key, &IDBE_IV),
            Err(CryptoError::InvalidPlaintextLength(15))
        );
    }

    #[test]
    fn test_empty_input() {
        let key = IDBE_KEYS[3];
        assert!(decrypt_aes_cbc(&[], &key, &IDBE_IV).expect("empty").is_empty());
    }

    proptest! {
        #[test]
        fn aes_cbc_round_trip_any_aligned_data(
            blocks in prop::collection::vec(prop::array::uniform16(any::<u8>()), 0..64),
            key_index in 0usize..4,
        ) {
            let data: Vec<u8> = blocks.concat();
            let key = IDBE_KEYS[key_index];
            let ciphertext = encrypt_aes_cbc(&data, &key, &IDBE_IV).expect("aligned");
            let decrypted = decrypt_aes_cbc(&ciphertext, &key, &IDBE_IV).expect("aligned");
            prop_assert_eq!(decrypted, data);
        }
    }
}
