//! Trust Generic Unit registers.
//!
//! Each TCM has its own TGU. The unit splits the TCM into equally sized blocks
//! and keeps one bit per block in its lookup table: a set bit makes the block
//! Non-Secure.

use tock_registers::interfaces::{Readable, Writeable};
use tock_registers::registers::{ReadOnly, ReadWrite};
use tock_registers::{register_bitfields, register_structs, LocalRegisterCopy};

use crate::layout::MemoryType;

/// Number of LUT registers implemented per TGU.
pub const LUT_WORDS: usize = 16;

/// Blocks described by one LUT register.
pub const BLOCKS_PER_WORD: u32 = u32::BITS;

register_bitfields![u32,
    pub CFG [
        /// Block size is 2^(BLKSZ + 5) bytes
        BLKSZ OFFSET(0) NUMBITS(4) [],
        /// The unit tracks 2^NUMBLKS blocks
        NUMBLKS OFFSET(8) NUMBITS(4) []
    ]
];

register_structs! {
    pub TguRegisterBlock {
        (0x000 => _ctrl),
        (0x004 => cfg: ReadOnly<u32, CFG::Register>),
        (0x008 => _reserved0),
        (0x010 => lut: [ReadWrite<u32>; LUT_WORDS]),
        (0x050 => @END),
    }
}

/// Access to the configuration and lookup table registers of one TGU.
///
/// Writes must reach the hardware in the order they are issued.
pub trait TguRegisters {
    /// Raw `TGU_CFG` value.
    fn cfg(&self) -> u32;

    fn lut(&self, word: usize) -> u32;

    fn set_lut(&mut self, word: usize, value: u32);
}

impl TguRegisters for &TguRegisterBlock {
    fn cfg(&self) -> u32 {
        self.cfg.get()
    }

    fn lut(&self, word: usize) -> u32 {
        self.lut[word].get()
    }

    fn set_lut(&mut self, word: usize, value: u32) {
        self.lut[word].set(value)
    }
}

/// Bytes covered by a single LUT bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSize(u32);

impl BlockSize {
    pub const MIN: BlockSize = BlockSize(32);

    pub const fn from_field(field: u32) -> Self {
        BlockSize(1 << (field + 5))
    }

    pub const fn bytes(self) -> u32 {
        self.0
    }

    pub const fn is_aligned(self, address: u32) -> bool {
        address & (self.0 - 1) == 0
    }
}

fn cfg<R: TguRegisters>(regs: &R) -> LocalRegisterCopy<u32, CFG::Register> {
    LocalRegisterCopy::new(regs.cfg())
}

/// Reads the block size the unit was built with.
pub fn block_size<R: TguRegisters>(regs: &R) -> BlockSize {
    BlockSize::from_field(cfg(regs).read(CFG::BLKSZ))
}

/// Number of blocks the lookup table can describe.
pub fn lut_capacity<R: TguRegisters>(regs: &R) -> u32 {
    let blocks = 1u32 << cfg(regs).read(CFG::NUMBLKS);
    blocks.min(LUT_WORDS as u32 * BLOCKS_PER_WORD)
}

/// One `R` per TCM unit, addressed by [`MemoryType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tgus<R> {
    pub itcm: R,
    pub dtcm: R,
}

impl<R> Tgus<R> {
    pub fn get(&self, memory: MemoryType) -> &R {
        match memory {
            MemoryType::Itcm => &self.itcm,
            MemoryType::Dtcm => &self.dtcm,
        }
    }

    pub fn get_mut(&mut self, memory: MemoryType) -> &mut R {
        match memory {
            MemoryType::Itcm => &mut self.itcm,
            MemoryType::Dtcm => &mut self.dtcm,
        }
    }
}

#[cfg(feature = "_alif-ensemble")]
impl Tgus<&'static TguRegisterBlock> {
    /// # Safety
    ///
    /// Nothing else may access the TGU registers while the returned value is alive.
    pub unsafe fn steal() -> Self {
        Self {
            itcm: &*(crate::layout::ITGU_BASE as *const TguRegisterBlock),
            dtcm: &*(crate::layout::DTGU_BASE as *const TguRegisterBlock),
        }
    }
}
