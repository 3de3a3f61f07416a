//! Block slicing over generated word lists.
//!
//! Long generated lists are paginated into fixed-size blocks so one
//! session stays manageable; custom decks bypass chunking entirely.

use crate::types::Word;

/// Cards per block when paginating a generated list.
pub const DEFAULT_BLOCK_SIZE: usize = 25;

/// Number of blocks a list of `total` words splits into.
pub fn block_count(total: usize, block_size: usize) -> usize {
    assert!(block_size > 0, "block size must be positive");
    total.div_ceil(block_size)
}

/// The `index`-th block: the slice `[index*size, min((index+1)*size, n))`.
/// Out-of-range indexes yield an empty slice.
pub fn block(words: &[Word], index: usize, block_size: usize) -> &[Word] {
    assert!(block_size > 0, "block size must be positive");
    let start = index.saturating_mul(block_size).min(words.len());
    let end = start.saturating_add(block_size).min(words.len());
    &words[start..end]
}

/// Whether any block follows block `index`.
pub fn has_more_blocks(total: usize, index: usize, block_size: usize) -> bool {
    assert!(block_size > 0, "block size must be positive");
    (index + 1).saturating_mul(block_size) < total
}
