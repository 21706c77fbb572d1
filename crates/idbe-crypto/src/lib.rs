//! Cryptographic operations for IDBE icon containers
//!
//! This crate provides the primitives the icon pipeline needs to open the
//! vendor's encrypted icon blobs and to fingerprint decoded bitmaps.
//!
//! # Components
//!
//! - **Encryption**: AES-128-CBC with the fixed IDBE IV and four-entry key table
//! - **Hashing**: MD5 content hashes used as atlas deduplication keys
//!
//! The key table and IV are public format parameters, not secrets, so they are
//! compiled in as constants.
//!
//! # Examples
//!
//! ## Content Hash Generation
//!
//! ```
//! use idbe_crypto::content_hash::ContentHash;
//!
//! let pixels = [0xFFu8; 48 * 48 * 3];
//! let hash = ContentHash::from_data(&pixels);
//! println!("Content hash: {}", hash);
//! ```
//!
//! ## Decrypting a Payload
//!
//! ```
//! use idbe_crypto::{IdbeKeyTable, decrypt_aes_cbc, encrypt_aes_cbc, IDBE_IV};
//!
//! let keys = IdbeKeyTable::new();
//! let key = keys.get(0).expect("key 0 is always present");
//!
//! let plaintext = [0x42u8; 32];
//! let ciphertext = encrypt_aes_cbc(&plaintext, key, &IDBE_IV)?;
//! let decrypted = decrypt_aes_cbc(&ciphertext, key, &IDBE_IV)?;
//! assert_eq!(decrypted, plaintext);
//! # Ok::<(), idbe_crypto::CryptoError>(())
//! ```

#![warn(missing_docs)]

pub mod aes_cbc;
pub mod content_hash;
pub mod error;
pub mod keys;

pub use error::CryptoError;

// Re-export commonly used types
pub use aes_cbc::{AES_BLOCK_SIZE, decrypt_aes_cbc, encrypt_aes_cbc};
pub use content_hash::ContentHash;
pub use keys::{IDBE_IV, IDBE_KEY_COUNT, IdbeKeyTable};
