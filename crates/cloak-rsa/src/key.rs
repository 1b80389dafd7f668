//! RSA key material derivation.

use std::fmt;

use num_bigint_dig::BigUint;
use num_traits::One;

use crate::arith::{gcd, is_prime, mod_inverse};
use crate::error::RsaError;

/// Largest plaintext symbol; the modulus must exceed it.
pub const MAX_SYMBOL: u64 = 255;

/// Public half of a key pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    /// Modulus `n = p·q`.
    pub n: BigUint,
    /// Public exponent.
    pub e: BigUint,
}

/// Complete key material `(p, q, n, r, e, d)`.
///
/// Immutable once built. `Debug` output only shows the public values.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyMaterial {
    p: BigUint,
    q: BigUint,
    n: BigUint,
    r: BigUint,
    e: BigUint,
    d: BigUint,
}

impl KeyMaterial {
    /// Derives the key pair from two distinct primes whose product exceeds 255.
    ///
    /// `e` is the smallest integer from 3 upward that is coprime with the
    /// totient `r = (p−1)(q−1)`; `d` is its inverse modulo `r`.
    pub fn from_primes(p: u64, q: u64) -> Result<Self, RsaError> {
        let p_big = BigUint::from(p);
        let q_big = BigUint::from(q);
        for (value, big) in [(p, &p_big), (q, &q_big)] {
            if !is_prime(big) {
                return Err(RsaError::InvalidPrime(value));
            }
        }
        if p == q {
            return Err(RsaError::KeyGenerationFailure(
                "p and q must be distinct".to_string(),
            ));
        }

        let n = &p_big * &q_big;
        if n <= BigUint::from(MAX_SYMBOL) {
            return Err(RsaError::KeyGenerationFailure(format!(
                "modulus {n} cannot encode every byte"
            )));
        }

        let one = BigUint::one();
        let r = (&p_big - &one) * (&q_big - &one);
        let e = smallest_public_exponent(&r);
        let d = mod_inverse(&e, &r).ok_or_else(|| {
            RsaError::KeyGenerationFailure(format!("{e} has no inverse modulo the totient"))
        })?;

        Ok(Self {
            p: p_big,
            q: q_big,
            n,
            r,
            e,
            d,
        })
    }

    /// First prime factor.
    pub fn p(&self) -> &BigUint {
        &self.p
    }

    /// Second prime factor.
    pub fn q(&self) -> &BigUint {
        &self.q
    }

    /// Public modulus.
    pub fn n(&self) -> &BigUint {
        &self.n
    }

    /// Totient `(p−1)(q−1)`.
    pub fn r(&self) -> &BigUint {
        &self.r
    }

    /// Public exponent.
    pub fn e(&self) -> &BigUint {
        &self.e
    }

    /// Private exponent.
    pub fn d(&self) -> &BigUint {
        &self.d
    }

    /// Public half of the key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            n: self.n.clone(),
            e: self.e.clone(),
        }
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("n", &format_args!("{}", self.n))
            .field("e", &format_args!("{}", self.e))
            .finish_non_exhaustive()
    }
}

fn smallest_public_exponent(r: &BigUint) -> BigUint {
    let one = BigUint::one();
    let mut e = BigUint::from(3u32);
    while !gcd(&e, r).is_one() {
        e += &one;
    }
    e
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_textbook_values() {
        // p = 101, q = 103: r = 10200 = 2^3·3·5^2·17, so 3 and 5 are skipped.
        let keys = KeyMaterial::from_primes(101, 103).unwrap();
        assert_eq!(keys.n(), &BigUint::from(10_403u32));
        assert_eq!(keys.r(), &BigUint::from(10_200u32));
        assert_eq!(keys.e(), &BigUint::from(7u32));
        assert!(((keys.e() * keys.d()) % keys.r()).is_one());
    }

    #[test]
    fn rejects_composite_and_equal_primes() {
        assert_eq!(
            KeyMaterial::from_primes(100, 103),
            Err(RsaError::InvalidPrime(100))
        );
        assert!(matches!(
            KeyMaterial::from_primes(101, 101),
            Err(RsaError::KeyGenerationFailure(_))
        ));
    }

    #[test]
    fn rejects_modulus_too_small_for_bytes() {
        assert!(matches!(
            KeyMaterial::from_primes(11, 13),
            Err(RsaError::KeyGenerationFailure(_))
        ));
        assert!(KeyMaterial::from_primes(17, 19).is_ok());
    }

    #[test]
    fn debug_omits_private_values() {
        let keys = KeyMaterial::from_primes(101, 103).unwrap();
        let text = format!("{keys:?}");
        assert!(text.contains("10403"));
        assert!(!text.contains("101,"));
        assert!(!text.contains(&keys.d().to_string()));
    }
}
