//! Error type for the public-key engine.

use num_bigint_dig::BigUint;
use thiserror::Error;

/// Errors returned by [`RsaCipher`](crate::RsaCipher) and key generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RsaError {
    /// No usable pair of primes could be drawn from the configured range.
    #[error("key generation failed: {0}")]
    KeyGenerationFailure(String),
    /// A value supplied as a prime factor is not prime.
    #[error("{0} is not prime")]
    InvalidPrime(u64),
    /// A ciphertext symbol decrypted to something other than a byte, which
    /// means the ciphertext was corrupted or produced under another key.
    #[error("symbol {index} decrypted to {value}, outside the byte range")]
    OutOfRangeDecryption {
        /// Position of the offending symbol.
        index: usize,
        /// Decrypted value.
        value: BigUint,
    },
    /// A ciphertext symbol is not below the modulus, so it was not produced
    /// under this key.
    #[error("symbol {index} is not reduced modulo n")]
    SymbolNotReduced {
        /// Position of the offending symbol.
        index: usize,
    },
    /// Decrypted bytes are not valid UTF-8.
    #[error("decrypted text is not valid UTF-8")]
    InvalidUtf8,
}
