//! Message padding to a whole number of blocks.
//!
//! Padding always appends between 1 and 16 bytes, each holding the pad length,
//! so an already aligned message gains a full extra block.

use crate::block::BLOCK_SIZE;
use crate::error::AesError;

/// How [`unpad`] treats the trailing padding bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PaddingMode {
    /// Trusts the final byte as the pad length and drops that many bytes
    /// without inspecting them. A pad length of zero drops nothing and one
    /// longer than the buffer empties it.
    ///
    /// This accepts tampered padding and is kept for compatibility with
    /// existing ciphertexts.
    #[default]
    Lenient,
    /// Requires a pad length in `1..=16` with every pad byte equal to it.
    Strict,
}

/// Returns the number of padding bytes appended to a message of `len` bytes.
#[inline]
pub fn pad_len(len: usize) -> usize {
    BLOCK_SIZE - (len % BLOCK_SIZE)
}

/// Pads `message` up to the next block boundary.
pub fn pad(message: &[u8]) -> Vec<u8> {
    let extra = pad_len(message.len());
    let mut padded = Vec::with_capacity(message.len() + extra);
    padded.extend_from_slice(message);
    padded.resize(message.len() + extra, extra as u8);
    padded
}

/// Strips padding in place according to `mode`.
pub fn unpad(mut message: Vec<u8>, mode: PaddingMode) -> Result<Vec<u8>, AesError> {
    if message.is_empty() {
        return match mode {
            PaddingMode::Lenient => Ok(message),
            PaddingMode::Strict => Err(AesError::InvalidPadding),
        };
    }
    let last = message[message.len() - 1];
    let count = usize::from(last);

    match mode {
        PaddingMode::Lenient => {
            let keep = message.len().saturating_sub(count);
            message.truncate(keep);
        }
        PaddingMode::Strict => {
            if count == 0 || count > BLOCK_SIZE || count > message.len() {
                return Err(AesError::InvalidPadding);
            }
            let keep = message.len() - count;
            if message[keep..].iter().any(|&b| b != last) {
                return Err(AesError::InvalidPadding);
            }
            message.truncate(keep);
        }
    }

    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_length_is_between_one_and_block() {
        assert_eq!(pad_len(0), 16);
        assert_eq!(pad_len(1), 15);
        assert_eq!(pad_len(15), 1);
        assert_eq!(pad_len(16), 16);
        assert_eq!(pad_len(17), 15);
    }

    #[test]
    fn pad_fills_with_length_byte() {
        let padded = pad(b"hello");
        assert_eq!(padded.len(), 16);
        assert_eq!(&padded[..5], b"hello");
        assert!(padded[5..].iter().all(|&b| b == 11));
    }

    #[test]
    fn aligned_input_gains_full_block() {
        let padded = pad(&[0x42; 16]);
        assert_eq!(padded.len(), 32);
        assert_eq!(&padded[16..], &[16u8; 16]);
    }

    #[test]
    fn unpad_reverses_pad() {
        for len in [0usize, 1, 15, 16, 17, 31, 32] {
            let message: Vec<u8> = (0..len).map(|i| i as u8).collect();
            for mode in [PaddingMode::Lenient, PaddingMode::Strict] {
                assert_eq!(unpad(pad(&message), mode).unwrap(), message);
            }
        }
    }

    #[test]
    fn lenient_ignores_tampered_pad_bytes() {
        let mut padded = pad(b"abc");
        padded[5] ^= 0xff;
        assert_eq!(unpad(padded.clone(), PaddingMode::Lenient).unwrap(), b"abc");
        assert_eq!(
            unpad(padded, PaddingMode::Strict),
            Err(AesError::InvalidPadding)
        );
    }

    #[test]
    fn lenient_handles_degenerate_lengths() {
        let mut zero = vec![7u8; 16];
        zero[15] = 0;
        assert_eq!(unpad(zero.clone(), PaddingMode::Lenient).unwrap(), zero);

        let mut oversized = vec![1u8; 16];
        oversized[15] = 200;
        assert!(unpad(oversized, PaddingMode::Lenient).unwrap().is_empty());
    }

    #[test]
    fn strict_rejects_out_of_range_lengths() {
        let zero = vec![0u8; 16];
        assert_eq!(unpad(zero, PaddingMode::Strict), Err(AesError::InvalidPadding));

        let oversized = vec![17u8; 32];
        assert_eq!(
            unpad(oversized, PaddingMode::Strict),
            Err(AesError::InvalidPadding)
        );
    }
}
