//! Byte-per-symbol RSA engine.

use num_bigint_dig::BigUint;
use num_traits::ToPrimitive;
use rand::{rngs::OsRng, CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::debug;

use crate::arith::mod_exp;
use crate::config::KeyGenConfig;
use crate::error::RsaError;
use crate::key::{KeyMaterial, PublicKey, MAX_SYMBOL};
use crate::prime::sample_prime_pair;

/// Textbook RSA over a small modulus, one ciphertext integer per byte.
///
/// Each instance owns an ephemeral key pair generated at construction. Every
/// byte is encrypted independently, so equal bytes always produce equal
/// ciphertext integers under the same key.
#[derive(Clone, Debug)]
pub struct RsaCipher {
    keys: KeyMaterial,
}

impl RsaCipher {
    /// Generates a fresh key pair with the default configuration, seeding a
    /// ChaCha20 generator from the operating system.
    pub fn new() -> Result<Self, RsaError> {
        let mut seed = [0u8; 32];
        OsRng.fill_bytes(&mut seed);
        let mut rng = ChaCha20Rng::from_seed(seed);
        Self::generate(&mut rng, &KeyGenConfig::default())
    }

    /// Generates a key pair from the caller's random source.
    pub fn generate<R: RngCore + CryptoRng>(
        rng: &mut R,
        config: &KeyGenConfig,
    ) -> Result<Self, RsaError> {
        let (p, q) = sample_prime_pair(rng, &config.prime_range, config.max_attempts, |p, q| {
            p != q && u128::from(p) * u128::from(q) > u128::from(MAX_SYMBOL)
        })?;
        let keys = KeyMaterial::from_primes(p, q)?;
        debug!(
            modulus_bits = keys.n().bits(),
            e = %keys.e(),
            "generated key pair"
        );
        Ok(Self { keys })
    }

    /// Builds the key pair from two known primes.
    pub fn from_primes(p: u64, q: u64) -> Result<Self, RsaError> {
        Ok(Self {
            keys: KeyMaterial::from_primes(p, q)?,
        })
    }

    /// Full key material.
    pub fn key_material(&self) -> &KeyMaterial {
        &self.keys
    }

    /// Public half of the key pair.
    pub fn public_key(&self) -> PublicKey {
        self.keys.public_key()
    }

    /// Computes `m^e mod n`. Values of `m` at or above `n` wrap silently.
    pub fn encrypt_int(&self, message: &BigUint) -> BigUint {
        mod_exp(message, self.keys.e(), self.keys.n())
    }

    /// Computes `c^d mod n`.
    pub fn decrypt_int(&self, ciphertext: &BigUint) -> BigUint {
        mod_exp(ciphertext, self.keys.d(), self.keys.n())
    }

    /// Encrypts every byte of `text` on its own.
    pub fn encrypt_string(&self, text: &[u8]) -> Vec<BigUint> {
        text.iter()
            .map(|&byte| self.encrypt_int(&BigUint::from(byte)))
            .collect()
    }

    /// Decrypts a symbol sequence back into bytes.
    ///
    /// Fails on the first symbol whose plaintext is not a byte instead of
    /// truncating it. Symbols at or above `n` are reduced modulo `n` first,
    /// so a symbol from a larger foreign modulus may still decrypt to a
    /// plausible byte; [`decrypt_string_strict`](Self::decrypt_string_strict)
    /// rejects those up front.
    pub fn decrypt_string(&self, ciphertext: &[BigUint]) -> Result<Vec<u8>, RsaError> {
        ciphertext
            .iter()
            .enumerate()
            .map(|(index, symbol)| {
                let value = self.decrypt_int(symbol);
                value
                    .to_u8()
                    .ok_or(RsaError::OutOfRangeDecryption { index, value })
            })
            .collect()
    }

    /// Like [`decrypt_string`](Self::decrypt_string), but first rejects any
    /// symbol that is not below the modulus, since this key never produces one.
    pub fn decrypt_string_strict(&self, ciphertext: &[BigUint]) -> Result<Vec<u8>, RsaError> {
        if let Some(index) = ciphertext.iter().position(|symbol| symbol >= self.keys.n()) {
            return Err(RsaError::SymbolNotReduced { index });
        }
        self.decrypt_string(ciphertext)
    }

    /// Encrypts the UTF-8 bytes of `text`.
    pub fn encrypt_str(&self, text: &str) -> Vec<BigUint> {
        self.encrypt_string(text.as_bytes())
    }

    /// Decrypts a symbol sequence that is expected to hold UTF-8 text.
    pub fn decrypt_to_string(&self, ciphertext: &[BigUint]) -> Result<String, RsaError> {
        let bytes = self.decrypt_string(ciphertext)?;
        String::from_utf8(bytes).map_err(|_| RsaError::InvalidUtf8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::One;

    fn cipher() -> RsaCipher {
        RsaCipher::from_primes(101, 103).unwrap()
    }

    #[test]
    fn textbook_symbol() {
        // e = 7, n = 10403
        let c = cipher().encrypt_int(&BigUint::from(2u32));
        assert_eq!(c, BigUint::from(128u32));
        assert_eq!(cipher().decrypt_int(&c), BigUint::from(2u32));
    }

    #[test]
    fn every_byte_round_trips() {
        let rsa = cipher();
        for m in 0..=255u32 {
            let m = BigUint::from(m);
            assert_eq!(rsa.decrypt_int(&rsa.encrypt_int(&m)), m);
        }
    }

    #[test]
    fn out_of_range_message_wraps() {
        let rsa = cipher();
        let n = rsa.key_material().n().clone();
        let m = BigUint::from(42u32);
        assert_eq!(rsa.encrypt_int(&(&m + &n)), rsa.encrypt_int(&m));
    }

    #[test]
    fn equal_bytes_share_ciphertext() {
        let ct = cipher().encrypt_string(b"aXa");
        assert_eq!(ct.len(), 3);
        assert_eq!(ct[0], ct[2]);
        assert_ne!(ct[0], ct[1]);
    }

    #[test]
    fn rejects_symbol_outside_byte_range() {
        let rsa = cipher();
        // 256 encrypts to something that decrypts back to 256.
        let bad = rsa.encrypt_int(&BigUint::from(256u32));
        let mut ct = rsa.encrypt_string(b"ok");
        ct.push(bad);
        assert_eq!(
            rsa.decrypt_string(&ct),
            Err(RsaError::OutOfRangeDecryption {
                index: 2,
                value: BigUint::from(256u32),
            })
        );
    }

    #[test]
    fn strict_decrypt_rejects_unreduced_symbol() {
        let rsa = cipher();
        let n = rsa.key_material().n().clone();
        let mut ct = rsa.encrypt_string(b"hi");
        let wrapped = &ct[1] + &n;
        assert_eq!(rsa.decrypt_string(&[ct[0].clone(), wrapped.clone()]).unwrap(), b"hi");
        ct[1] = wrapped;
        assert_eq!(
            rsa.decrypt_string_strict(&ct),
            Err(RsaError::SymbolNotReduced { index: 1 })
        );
        assert_eq!(
            rsa.decrypt_string_strict(&rsa.encrypt_string(b"hi")).unwrap(),
            b"hi"
        );
    }

    #[test]
    fn utf8_helpers() {
        let rsa = cipher();
        let ct = rsa.encrypt_str("zażółć");
        assert_eq!(rsa.decrypt_to_string(&ct).unwrap(), "zażółć");

        let broken = rsa.encrypt_string(&[0xff, 0xfe]);
        assert_eq!(rsa.decrypt_to_string(&broken), Err(RsaError::InvalidUtf8));
    }

    #[test]
    fn exponent_invariants_hold() {
        let keys = cipher().key_material().clone();
        assert!(((keys.e() * keys.d()) % keys.r()).is_one());
        assert_eq!(keys.n(), &(keys.p() * keys.q()));
    }
}
