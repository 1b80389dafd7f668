//! AES round transformations over a column-major 4×4 state.
//!
//! Byte `4 * c + r` of a [`Block`] holds row `r` of column `c`.

use crate::block::{xor_in_place, Block};
use crate::sbox::{inv_sbox, sbox};

/// Forward MixColumns coefficients, one row per output byte.
const MIX: [[u8; 4]; 4] = [
    [0x02, 0x03, 0x01, 0x01],
    [0x01, 0x02, 0x03, 0x01],
    [0x01, 0x01, 0x02, 0x03],
    [0x03, 0x01, 0x01, 0x02],
];

/// Inverse MixColumns coefficients.
const INV_MIX: [[u8; 4]; 4] = [
    [0x0e, 0x0b, 0x0d, 0x09],
    [0x09, 0x0e, 0x0b, 0x0d],
    [0x0d, 0x09, 0x0e, 0x0b],
    [0x0b, 0x0d, 0x09, 0x0e],
];

/// SubBytes: forward S-box on every byte.
#[inline]
pub fn sub_bytes(state: &mut Block) {
    for byte in state.iter_mut() {
        *byte = sbox(*byte);
    }
}

/// InvSubBytes: inverse S-box on every byte.
#[inline]
pub fn inv_sub_bytes(state: &mut Block) {
    for byte in state.iter_mut() {
        *byte = inv_sbox(*byte);
    }
}

/// ShiftRows: row `r` rotates left by `r` columns.
#[inline]
pub fn shift_rows(state: &mut Block) {
    let src = *state;
    for row in 1..4 {
        for col in 0..4 {
            state[col * 4 + row] = src[((col + row) % 4) * 4 + row];
        }
    }
}

/// InvShiftRows: row `r` rotates right by `r` columns.
#[inline]
pub fn inv_shift_rows(state: &mut Block) {
    let src = *state;
    for row in 1..4 {
        for col in 0..4 {
            state[((col + row) % 4) * 4 + row] = src[col * 4 + row];
        }
    }
}

/// Multiplies two field elements of GF(2^8) modulo `x^8 + x^4 + x^3 + x + 1`.
///
/// Carry-less shift-and-add: the multiplicand is doubled once per bit of the
/// multiplier and reduced with `0x1b` whenever it overflows.
pub fn gf_mul(mut a: u8, mut b: u8) -> u8 {
    let mut product = 0u8;
    while b != 0 {
        if b & 1 != 0 {
            product ^= a;
        }
        let carry = a & 0x80 != 0;
        a <<= 1;
        if carry {
            a ^= 0x1b;
        }
        b >>= 1;
    }
    product
}

fn mix_with(state: &mut Block, matrix: &[[u8; 4]; 4]) {
    for column in state.chunks_exact_mut(4) {
        let input = [column[0], column[1], column[2], column[3]];
        for (out, coeffs) in column.iter_mut().zip(matrix.iter()) {
            *out = coeffs
                .iter()
                .zip(input.iter())
                .fold(0u8, |acc, (&c, &x)| acc ^ gf_mul(c, x));
        }
    }
}

/// MixColumns over all four columns.
#[inline]
pub fn mix_columns(state: &mut Block) {
    mix_with(state, &MIX);
}

/// InvMixColumns over all four columns.
#[inline]
pub fn inv_mix_columns(state: &mut Block) {
    mix_with(state, &INV_MIX);
}

/// AddRoundKey: XORs a 16-byte round key into the state.
#[inline]
pub fn add_round_key(state: &mut Block, round_key: &Block) {
    xor_in_place(state, round_key);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequential() -> Block {
        std::array::from_fn(|i| i as u8)
    }

    #[test]
    fn gf_mul_matches_fips_example() {
        // FIPS-197 section 4.2: {57} • {83} = {c1}, {57} • {13} = {fe}
        assert_eq!(gf_mul(0x57, 0x83), 0xc1);
        assert_eq!(gf_mul(0x57, 0x13), 0xfe);
        assert_eq!(gf_mul(0x01, 0xab), 0xab);
        assert_eq!(gf_mul(0x00, 0xab), 0x00);
    }

    #[test]
    fn shift_rows_permutation() {
        let mut state = sequential();
        shift_rows(&mut state);
        assert_eq!(
            state,
            [0, 5, 10, 15, 4, 9, 14, 3, 8, 13, 2, 7, 12, 1, 6, 11]
        );
        inv_shift_rows(&mut state);
        assert_eq!(state, sequential());
    }

    #[test]
    fn mix_columns_known_column() {
        // Widely used test column: db 13 53 45 -> 8e 4d a1 bc
        let mut state = [0u8; 16];
        state[..4].copy_from_slice(&[0xdb, 0x13, 0x53, 0x45]);
        mix_columns(&mut state);
        assert_eq!(&state[..4], &[0x8e, 0x4d, 0xa1, 0xbc]);
        inv_mix_columns(&mut state);
        assert_eq!(&state[..4], &[0xdb, 0x13, 0x53, 0x45]);
    }

    #[test]
    fn sub_bytes_inverts() {
        let mut state = sequential();
        sub_bytes(&mut state);
        assert_ne!(state, sequential());
        inv_sub_bytes(&mut state);
        assert_eq!(state, sequential());
    }
}
