//! Programming of the TGU lookup table.

use crate::region::BlockRange;
use crate::tgu::{TguRegisters, BLOCKS_PER_WORD};

/// Mask with bits `lo` up to and including `hi` set.
pub const fn set_bit_range(lo: u32, hi: u32) -> u32 {
    debug_assert!(lo <= hi && hi < u32::BITS);
    (u32::MAX >> (31 - hi)) & (u32::MAX << lo)
}

/// The LUT words touched by a block range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LutSpan {
    pub start_word: usize,
    pub end_word: usize,
    pub start_offset: u32,
    pub end_offset: u32,
}

impl LutSpan {
    pub const fn new(blocks: BlockRange) -> Self {
        Self {
            start_word: (blocks.start / BLOCKS_PER_WORD) as usize,
            end_word: (blocks.end / BLOCKS_PER_WORD) as usize,
            start_offset: blocks.start % BLOCKS_PER_WORD,
            end_offset: blocks.end % BLOCKS_PER_WORD,
        }
    }

    /// `(word, mask)` pairs in ascending word order.
    pub fn masks(&self) -> impl Iterator<Item = (usize, u32)> {
        let span = *self;

        (span.start_word..=span.end_word).map(move |word| {
            let lo = if word == span.start_word { span.start_offset } else { 0 };
            let hi = if word == span.end_word { span.end_offset } else { 31 };
            (word, set_bit_range(lo, hi))
        })
    }
}

/// Marks every block in `blocks` as Non-Secure, keeping bits that are already set.
pub fn program<R: TguRegisters>(regs: &mut R, blocks: BlockRange) {
    for (word, mask) in LutSpan::new(blocks).masks() {
        if mask == u32::MAX {
            regs.set_lut(word, mask);
        } else {
            let value = regs.lut(word);
            regs.set_lut(word, value | mask);
        }
    }
}
