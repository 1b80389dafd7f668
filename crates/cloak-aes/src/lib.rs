//! From-scratch AES-128 engine used by Cloak.
//!
//! This crate follows the FIPS-197 specification and provides:
//! - The AES-128 key schedule.
//! - Single-block encryption and decryption.
//! - Message padding and a block-by-block (ECB) message engine.
//!
//! The implementation aims for clarity and testability rather than constant-time
//! guarantees; it should not be treated as side-channel hardened. ECB mode and
//! the default lenient unpadding are known weaknesses kept for compatibility.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod engine;
mod error;
mod key;
mod padding;
mod round;
mod sbox;

pub use crate::block::{Block, BLOCK_SIZE};
pub use crate::cipher::{decrypt_block, encrypt_block, expand_key, ROUNDS};
pub use crate::engine::BlockCipher;
pub use crate::error::AesError;
pub use crate::key::{Aes128Key, RoundKeys};
pub use crate::padding::{pad, pad_len, unpad, PaddingMode};
pub use crate::round::gf_mul;
pub use crate::sbox::{inv_sbox, sbox};
