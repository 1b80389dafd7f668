//! Block representation helpers.

/// Size of one cipher block in bytes.
pub const BLOCK_SIZE: usize = 16;

/// A single 16-byte cipher block, laid out column-major as a 4×4 matrix.
pub type Block = [u8; BLOCK_SIZE];

/// XORs `rhs` into `dst`.
#[inline]
pub fn xor_in_place(dst: &mut Block, rhs: &Block) {
    for (d, r) in dst.iter_mut().zip(rhs.iter()) {
        *d ^= *r;
    }
}

/// Copies a slice of exactly [`BLOCK_SIZE`] bytes into an owned block.
///
/// Callers obtain the slice from `chunks_exact(BLOCK_SIZE)`, so the length is
/// always correct; the copy gives each transform call its own working state.
#[inline]
pub(crate) fn to_block(chunk: &[u8]) -> Block {
    let mut block = [0u8; BLOCK_SIZE];
    block.copy_from_slice(chunk);
    block
}
