use core::fmt;

use crate::layout::{MemoryType, TcmWindow};
use crate::tgu::BlockSize;

/// An address range that is handed to the non-secure world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub start: u32,
    /// Last byte of the region.
    pub end: u32,
    pub memory: MemoryType,
}

impl Region {
    pub const fn new(start: u32, end: u32, memory: MemoryType) -> Self {
        Self { start, end, memory }
    }

    /// Builds a region from a pair of linker symbols, where `end` points one past
    /// the last byte. Returns `None` for an empty range.
    pub const fn from_linker_range(start: u32, end: u32, memory: MemoryType) -> Option<Self> {
        if end <= start {
            return None;
        }

        Some(Self::new(start, end - 1, memory))
    }

    /// The inclusive range of TGU blocks covering this region.
    ///
    /// Addresses that are not block aligned are rounded down to their block.
    pub const fn block_range(&self, base: u32, block_size: BlockSize) -> BlockRange {
        BlockRange {
            start: (self.start - base) / block_size.bytes(),
            end: (self.end - base) / block_size.bytes(),
        }
    }

    /// Whether the SAU, which works in 32 byte granules, can describe the region exactly.
    pub const fn is_sau_aligned(&self) -> bool {
        self.start & 0x1F == 0 && self.end & 0x1F == 0x1F
    }

    /// Checks that the region can be expressed exactly in the lookup table of `window`.
    pub fn validate(
        &self,
        window: &TcmWindow,
        block_size: BlockSize,
        capacity: u32,
    ) -> Result<(), RegionError> {
        if self.start > self.end {
            return Err(RegionError::Inverted {
                start: self.start,
                end: self.end,
            });
        }

        for address in [self.start, self.end] {
            if !window.contains(address) {
                return Err(RegionError::OutsideWindow {
                    address,
                    memory: self.memory,
                });
            }
        }

        // Blocks are counted from the window base, not from address zero.
        if !block_size.is_aligned(self.start - window.base) {
            return Err(RegionError::Misaligned {
                address: self.start,
                block_size: block_size.bytes(),
            });
        }

        // `end` is inclusive, so the byte after it has to start a block.
        if !block_size.is_aligned((self.end - window.base).wrapping_add(1)) {
            return Err(RegionError::Misaligned {
                address: self.end,
                block_size: block_size.bytes(),
            });
        }

        let blocks = self.block_range(window.base, block_size);
        if blocks.end >= capacity {
            return Err(RegionError::BeyondLut {
                block: blocks.end,
                capacity,
            });
        }

        Ok(())
    }
}

/// Inclusive range of block indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRange {
    pub start: u32,
    pub end: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionError {
    Inverted { start: u32, end: u32 },
    OutsideWindow { address: u32, memory: MemoryType },
    Misaligned { address: u32, block_size: u32 },
    BeyondLut { block: u32, capacity: u32 },
}

impl fmt::Display for RegionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionError::Inverted { start, end } => {
                write!(f, "region end {end:#010X} lies below its start {start:#010X}")
            }
            RegionError::OutsideWindow { address, memory } => {
                write!(f, "address {address:#010X} is outside of {}", memory.name())
            }
            RegionError::Misaligned {
                address,
                block_size,
            } => write!(
                f,
                "address {address:#010X} does not sit on a {block_size} byte block boundary"
            ),
            RegionError::BeyondLut { block, capacity } => write!(
                f,
                "block {block} is beyond the {capacity} blocks of the lookup table"
            ),
        }
    }
}
