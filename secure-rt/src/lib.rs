#![cfg_attr(not(test), no_std)]

mod configure;
pub mod layout;
pub mod lut;
pub mod region;
pub mod tgu;

#[cfg(all(feature = "_alif-ensemble", target_arch = "arm"))]
mod alif;

#[cfg(all(feature = "_alif-ensemble", target_arch = "arm"))]
pub mod sau;

pub use configure::{configure_non_secure_regions, validate_regions};
pub use layout::{MemoryType, TcmLayout, TcmWindow};
pub use region::{BlockRange, Region, RegionError};
pub use tgu::{BlockSize, TguRegisterBlock, TguRegisters, Tgus};

#[cfg(all(feature = "_alif-ensemble", target_arch = "arm"))]
pub use alif::{initialize, non_secure_regions};

#[cfg(not(any(feature = "_alif-ensemble", not(target_arch = "arm"))))]
compile_error!("Select a chip with the feature flags: `ensemble-he` or `ensemble-hp`.");

#[cfg(all(feature = "ensemble-he", feature = "ensemble-hp"))]
compile_error!("The `ensemble-he` and `ensemble-hp` features are mutually exclusive.");
