//! Makes the CPU's view of the non-secure TCM ranges match the TGU's.
//!
//! The TGU decides which bus accesses to the TCM are allowed. The core only
//! issues non-secure accesses to addresses the SAU calls Non-Secure, so the
//! same ranges need a SAU region too.

use cortex_m::peripheral::sau::{SauError, SauRegion, SauRegionAttribute};

use rtt_target::rprintln;

use crate::region::Region;

pub fn read_address_permissions(address: u32) -> SauRegionAttribute {
    let value = cortex_m::asm::tt(address as *mut u32);

    let s = value & (1 << 22) > 0;
    let nsrw = value & (1 << 21) > 0;

    match (s, nsrw) {
        (_, true) => SauRegionAttribute::NonSecureCallable,
        (true, false) => SauRegionAttribute::Secure,
        (false, false) => SauRegionAttribute::NonSecure,
    }
}

fn needs_sau_region(region: &Region) -> bool {
    !matches!(
        read_address_permissions(region.start),
        SauRegionAttribute::NonSecure
    )
}

/// Adds a Non-Secure SAU region for every region the SAU does not already treat as
/// Non-Secure, starting at SAU region `first_region`, and enables the SAU.
///
/// All regions are checked before the first SAU register is written, so on error
/// the SAU is left exactly as it was.
///
/// Returns the first SAU region number that is still free.
pub fn mark_non_secure(first_region: u8, regions: &[Region]) -> Result<u8, SauError> {
    let mut sau = unsafe { core::mem::transmute::<_, cortex_m::peripheral::SAU>(()) };

    let mut needed = 0;
    for region in regions.iter().filter(|region| needs_sau_region(region)) {
        if region.start & 0x1F != 0 {
            return Err(SauError::WrongBaseAddress);
        }
        if !region.is_sau_aligned() {
            return Err(SauError::WrongLimitAddress);
        }
        needed += 1;
    }

    if usize::from(first_region) + needed > usize::from(sau.region_numbers()) {
        return Err(SauError::RegionNumberTooBig);
    }

    let mut current_region_number = first_region;

    for region in regions.iter().filter(|region| needs_sau_region(region)) {
        sau.set_region(
            current_region_number,
            SauRegion {
                base_address: region.start,
                limit_address: region.end,
                attribute: SauRegionAttribute::NonSecure,
            },
        )?;

        rprintln!(
            "SAU region {}: {:#010X}..={:#010X} = NS",
            current_region_number,
            region.start,
            region.end
        );

        current_region_number += 1;
    }

    sau.enable();

    Ok(current_region_number)
}
