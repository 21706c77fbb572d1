//! Error types for cryptographic operations

use thiserror::Error;

/// Errors that can occur during cryptographic operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// Invalid key size
    #[error("Invalid key size: expected {expected}, got {actual}")]
    InvalidKeySize {
        /// Expected key size in bytes
        expected: usize,
        /// Actual key size in bytes
        actual: usize,
    },

    /// Ciphertext is not a whole number of cipher blocks
    #[error("Invalid ciphertext length: {0} bytes is not a multiple of the 16-byte block size")]
    InvalidCiphertextLength(usize),

    /// Plaintext is not a whole number of cipher blocks
    #[error("Invalid plaintext length: {0} bytes is not a multiple of the 16-byte block size")]
    InvalidPlaintextLength(usize),

    /// Invalid key format
    #[error("Invalid key format: {0}")]
    InvalidKeyFormat(String),
}
