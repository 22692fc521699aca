use heapless::Vec;

use crate::layout::{MemoryType, TCM_LAYOUT};
use crate::region::Region;
use crate::tgu::Tgus;

/// The TCM ranges the linker script hands to the non-secure image.
///
/// Ranges left empty in the linker script are skipped.
pub fn non_secure_regions() -> Vec<Region, 2> {
    extern "C" {
        static _ns_dtcm_start: u32;
        static _ns_dtcm_end: u32;
        static _ns_itcm_start: u32;
        static _ns_itcm_end: u32;
    }

    let ns_dtcm_start = unsafe { core::mem::transmute::<_, u32>(&_ns_dtcm_start) };
    let ns_dtcm_end = unsafe { core::mem::transmute::<_, u32>(&_ns_dtcm_end) };
    let ns_itcm_start = unsafe { core::mem::transmute::<_, u32>(&_ns_itcm_start) };
    let ns_itcm_end = unsafe { core::mem::transmute::<_, u32>(&_ns_itcm_end) };

    [
        Region::from_linker_range(ns_dtcm_start, ns_dtcm_end, MemoryType::Dtcm),
        Region::from_linker_range(ns_itcm_start, ns_itcm_end, MemoryType::Itcm),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Hands the linker-provided TCM ranges to the non-secure world.
///
/// Call once from the secure image before jumping to non-secure code.
pub fn initialize() {
    let regions = non_secure_regions();

    let mut tgus = unsafe { Tgus::steal() };
    crate::configure_non_secure_regions(&mut tgus, &TCM_LAYOUT, &regions);

    // The lookup tables must be in effect before the non-secure image runs.
    cortex_m::asm::dsb();
    cortex_m::asm::isb();
}
