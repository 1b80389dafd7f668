//! Pedagogical RSA engine used by Cloak.
//!
//! Key pairs are built from two small primes drawn from a bounded range and
//! every plaintext byte is encrypted to its own integer. Arithmetic uses
//! arbitrary-precision integers so the prime range can be widened through
//! [`KeyGenConfig`], but the scheme has no padding and is not secure: it exists
//! to demonstrate prime generation, modular exponentiation and modular inverses.
//!
//! ```
//! use cloak_rsa::{KeyGenConfig, RsaCipher};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//! let rsa = RsaCipher::generate(&mut rng, &KeyGenConfig::default()).unwrap();
//! let ciphertext = rsa.encrypt_string(b"hello");
//! assert_eq!(rsa.decrypt_string(&ciphertext).unwrap(), b"hello");
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod arith;

mod cipher;
mod config;
mod error;
mod key;
mod prime;

pub use crate::cipher::RsaCipher;
pub use crate::config::{KeyGenConfig, MAX_PRIME_BITS};
pub use crate::error::RsaError;
pub use crate::key::{KeyMaterial, PublicKey, MAX_SYMBOL};
pub use num_bigint_dig::BigUint;
