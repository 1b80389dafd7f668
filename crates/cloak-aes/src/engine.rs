//! Message-level block cipher engine.

use tracing::trace;

use crate::block::{to_block, Block, BLOCK_SIZE};
use crate::cipher::{decrypt_block, encrypt_block, expand_key};
use crate::error::AesError;
use crate::key::{Aes128Key, RoundKeys};
use crate::padding::{pad, unpad, PaddingMode};

/// AES-128 engine in electronic-codebook mode.
///
/// The round keys are derived once at construction and never change, so a
/// single instance can serve concurrent callers. Every block is encrypted
/// independently: equal plaintext blocks at any position produce equal
/// ciphertext blocks, which leaks message structure.
#[derive(Clone, Debug)]
pub struct BlockCipher {
    round_keys: RoundKeys,
    padding: PaddingMode,
}

impl BlockCipher {
    /// Creates an engine from raw key bytes, which must be exactly 16 bytes long.
    pub fn new(key: &[u8]) -> Result<Self, AesError> {
        let key = Aes128Key::try_from(key)?;
        Ok(Self::from_key(&key))
    }

    /// Creates an engine from a typed key.
    pub fn from_key(key: &Aes128Key) -> Self {
        Self {
            round_keys: expand_key(key),
            padding: PaddingMode::default(),
        }
    }

    /// Selects how [`decrypt_message`](Self::decrypt_message) strips padding.
    pub fn with_padding(mut self, padding: PaddingMode) -> Self {
        self.padding = padding;
        self
    }

    /// Active padding mode.
    pub fn padding(&self) -> PaddingMode {
        self.padding
    }

    /// Expanded key schedule.
    pub fn round_keys(&self) -> &RoundKeys {
        &self.round_keys
    }

    /// Encrypts one block.
    pub fn encrypt_block(&self, block: &Block) -> Block {
        encrypt_block(block, &self.round_keys)
    }

    /// Decrypts one block.
    pub fn decrypt_block(&self, block: &Block) -> Block {
        decrypt_block(block, &self.round_keys)
    }

    /// Pads and encrypts an arbitrary-length message.
    ///
    /// The output is always a non-empty multiple of 16 bytes.
    pub fn encrypt_message(&self, plaintext: &[u8]) -> Vec<u8> {
        let mut buffer = pad(plaintext);
        for chunk in buffer.chunks_exact_mut(BLOCK_SIZE) {
            let block = self.encrypt_block(&to_block(chunk));
            chunk.copy_from_slice(&block);
        }
        trace!(blocks = buffer.len() / BLOCK_SIZE, "encrypted message");
        buffer
    }

    /// Decrypts a message produced by [`encrypt_message`](Self::encrypt_message).
    ///
    /// Fails before touching any block when the length is zero or not a
    /// multiple of 16.
    pub fn decrypt_message(&self, ciphertext: &[u8]) -> Result<Vec<u8>, AesError> {
        if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
            return Err(AesError::InvalidCiphertextLength {
                len: ciphertext.len(),
            });
        }

        let mut buffer = ciphertext.to_vec();
        for chunk in buffer.chunks_exact_mut(BLOCK_SIZE) {
            let block = self.decrypt_block(&to_block(chunk));
            chunk.copy_from_slice(&block);
        }
        trace!(blocks = buffer.len() / BLOCK_SIZE, "decrypted message");
        unpad(buffer, self.padding)
    }
}
