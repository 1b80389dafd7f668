//! Key generation parameters.

use std::ops::RangeInclusive;

use crate::error::RsaError;

/// Widest prime accepted by [`KeyGenConfig::with_prime_bits`]; trial division
/// becomes impractical beyond this.
pub const MAX_PRIME_BITS: u32 = 32;

/// Configuration for key-pair generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyGenConfig {
    /// Inclusive range the primes `p` and `q` are sampled from.
    pub prime_range: RangeInclusive<u64>,
    /// Upper bound on `(p, q)` candidate pair draws before giving up.
    pub max_attempts: usize,
}

impl Default for KeyGenConfig {
    fn default() -> Self {
        Self {
            prime_range: 100..=199,
            max_attempts: 10_000,
        }
    }
}

impl KeyGenConfig {
    /// Samples primes with exactly `bits` significant bits.
    pub fn with_prime_bits(bits: u32) -> Result<Self, RsaError> {
        if !(2..=MAX_PRIME_BITS).contains(&bits) {
            return Err(RsaError::KeyGenerationFailure(format!(
                "prime width must be between 2 and {MAX_PRIME_BITS} bits, got {bits}"
            )));
        }
        let low = 1u64 << (bits - 1);
        let high = (1u64 << bits) - 1;
        Ok(Self {
            prime_range: low..=high,
            ..Self::default()
        })
    }

    /// Replaces the prime range.
    pub fn prime_range(mut self, range: RangeInclusive<u64>) -> Self {
        self.prime_range = range;
        self
    }

    /// Replaces the attempt budget.
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts;
        self
    }
}
