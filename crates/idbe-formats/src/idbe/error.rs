//! IDBE error types

use idbe_crypto::CryptoError;
use thiserror::Error;

/// IDBE-specific error type
#[derive(Debug, Error)]
pub enum IdbeError {
    /// Blob shorter than the fixed layout requires
    #[error("blob too short: expected at least {expected} bytes, got {actual}")]
    BlobTooShort {
        /// Minimum blob size
        expected: usize,
        /// Actual blob size
        actual: usize,
    },

    /// Header selects a key outside the key table
    #[error("unknown key index: {0} (expected 0..=3)")]
    UnknownKeyIndex(u8),

    /// Ciphertext is not block aligned
    #[error("invalid ciphertext length: {0} bytes")]
    InvalidCiphertextLength(usize),

    /// Tiled pixel buffer has the wrong size for the requested dimensions
    #[error("invalid icon data: expected {expected} bytes, got {actual}")]
    InvalidIconData {
        /// Expected buffer size
        expected: usize,
        /// Actual buffer size
        actual: usize,
    },

    /// Icon dimensions that cannot be tiled or do not fit the slot
    #[error("invalid icon dimensions: {width}x{height}")]
    InvalidIconDimensions {
        /// Width in pixels
        width: u32,
        /// Height in pixels
        height: u32,
    },

    /// Title text does not fit its fixed-size field
    #[error("{field} too long: {actual} UTF-16 units, field holds {max}")]
    TitleTooLong {
        /// Field name
        field: &'static str,
        /// Field capacity in UTF-16 units
        max: usize,
        /// Encoded length in UTF-16 units
        actual: usize,
    },

    /// Cryptographic failure
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// Binary parsing error
    #[error("binary parsing error: {0}")]
    BinRw(#[from] binrw::Error),
}

/// Result type for IDBE operations
pub type IdbeResult<T> = Result<T, IdbeError>;
