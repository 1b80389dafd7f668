//! Cipher key and expanded key schedule types.

use crate::block::{Block, BLOCK_SIZE};
use crate::error::AesError;

/// Number of 32-bit words in the expanded key schedule.
pub const SCHEDULE_WORDS: usize = 44;

/// Number of round keys (initial key add plus ten rounds).
pub const ROUND_KEY_COUNT: usize = 11;

/// 128-bit cipher key.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Aes128Key(pub [u8; BLOCK_SIZE]);

impl From<[u8; BLOCK_SIZE]> for Aes128Key {
    fn from(value: [u8; BLOCK_SIZE]) -> Self {
        Self(value)
    }
}

impl TryFrom<&[u8]> for Aes128Key {
    type Error = AesError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; BLOCK_SIZE] = value
            .try_into()
            .map_err(|_| AesError::InvalidKeyLength { len: value.len() })?;
        Ok(Self(bytes))
    }
}

// Key bytes stay out of debug output.
impl core::fmt::Debug for Aes128Key {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Aes128Key(..)")
    }
}

/// Expanded round keys: 44 schedule words grouped into 11 blocks.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RoundKeys(pub(crate) [Block; ROUND_KEY_COUNT]);

impl RoundKeys {
    /// Returns the round key at the requested index (0..=10).
    #[inline]
    pub fn get(&self, round: usize) -> &Block {
        &self.0[round]
    }

    /// Returns schedule word `index` (0..44) as its four bytes.
    pub fn word(&self, index: usize) -> [u8; 4] {
        let block = &self.0[index / 4];
        let offset = (index % 4) * 4;
        [
            block[offset],
            block[offset + 1],
            block[offset + 2],
            block[offset + 3],
        ]
    }
}

impl core::fmt::Debug for RoundKeys {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("RoundKeys(..)")
    }
}
