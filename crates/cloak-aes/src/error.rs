//! Error type for the block cipher engine.

use thiserror::Error;

/// Errors returned by [`BlockCipher`](crate::BlockCipher) and the padding helpers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AesError {
    /// The key is not exactly 16 bytes.
    #[error("AES-128 key must be 16 bytes, got {len}")]
    InvalidKeyLength {
        /// Length of the rejected key.
        len: usize,
    },
    /// The ciphertext is empty or not a multiple of the block size.
    #[error("ciphertext length {len} is not a positive multiple of 16")]
    InvalidCiphertextLength {
        /// Length of the rejected ciphertext.
        len: usize,
    },
    /// Strict unpadding found a malformed padding block.
    #[error("invalid message padding")]
    InvalidPadding,
}
