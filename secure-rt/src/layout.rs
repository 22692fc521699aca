//! Address map of the tightly-coupled memories and their Trust Generic Units.

/// The two memories a TGU can guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryType {
    Itcm,
    Dtcm,
}

impl MemoryType {
    pub const fn name(self) -> &'static str {
        match self {
            MemoryType::Itcm => "ITCM",
            MemoryType::Dtcm => "DTCM",
        }
    }
}

/// A contiguous address window owned by one TCM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TcmWindow {
    pub base: u32,
    pub size: u32,
}

impl TcmWindow {
    pub const fn new(base: u32, size: u32) -> Self {
        Self { base, size }
    }

    pub const fn contains(&self, address: u32) -> bool {
        address >= self.base && address - self.base < self.size
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TcmLayout {
    pub itcm: TcmWindow,
    pub dtcm: TcmWindow,
}

impl TcmLayout {
    pub const fn window(&self, memory: MemoryType) -> &TcmWindow {
        match memory {
            MemoryType::Itcm => &self.itcm,
            MemoryType::Dtcm => &self.dtcm,
        }
    }
}

pub const ITCM_BASE: u32 = 0x0000_0000;
pub const DTCM_BASE: u32 = 0x2000_0000;

pub const ITGU_BASE: usize = 0xE001_E500;
pub const DTGU_BASE: usize = 0xE001_E600;

#[cfg(feature = "ensemble-he")]
pub const TCM_LAYOUT: TcmLayout = TcmLayout {
    itcm: TcmWindow::new(ITCM_BASE, 256 * 1024),
    dtcm: TcmWindow::new(DTCM_BASE, 256 * 1024),
};

#[cfg(feature = "ensemble-hp")]
pub const TCM_LAYOUT: TcmLayout = TcmLayout {
    itcm: TcmWindow::new(ITCM_BASE, 256 * 1024),
    dtcm: TcmWindow::new(DTCM_BASE, 1024 * 1024),
};
