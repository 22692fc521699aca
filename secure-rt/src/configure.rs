use rtt_target::rprintln;

use crate::layout::TcmLayout;
use crate::lut;
use crate::region::{Region, RegionError};
use crate::tgu::{self, BlockSize, TguRegisters, Tgus};

#[derive(Debug, Clone, Copy)]
struct UnitConfig {
    block_size: BlockSize,
    capacity: u32,
}

impl UnitConfig {
    fn read<R: TguRegisters>(regs: &R) -> Self {
        Self {
            block_size: tgu::block_size(regs),
            capacity: tgu::lut_capacity(regs),
        }
    }
}

fn unit_configs<R: TguRegisters>(tgus: &Tgus<R>) -> Tgus<UnitConfig> {
    Tgus {
        itcm: UnitConfig::read(&tgus.itcm),
        dtcm: UnitConfig::read(&tgus.dtcm),
    }
}

fn validate_against_unit(
    region: &Region,
    configs: &Tgus<UnitConfig>,
    layout: &TcmLayout,
) -> Result<(), RegionError> {
    let config = configs.get(region.memory);
    region.validate(layout.window(region.memory), config.block_size, config.capacity)
}

/// Checks every region against the block size and lookup table size the units report.
pub fn validate_regions<R: TguRegisters>(
    tgus: &Tgus<R>,
    layout: &TcmLayout,
    regions: &[Region],
) -> Result<(), RegionError> {
    let configs = unit_configs(tgus);

    regions
        .iter()
        .try_for_each(|region| validate_against_unit(region, &configs, layout))
}

/// Marks all `regions` as Non-Secure in the lookup tables of their TGU.
///
/// Must run before any non-secure code does. Bits set by earlier calls or other
/// regions are kept, so running it again with the same regions changes nothing.
///
/// # Panics
///
/// Panics before touching any register if a region is not exactly expressible in
/// blocks of its TGU.
pub fn configure_non_secure_regions<R: TguRegisters>(
    tgus: &mut Tgus<R>,
    layout: &TcmLayout,
    regions: &[Region],
) {
    let configs = unit_configs(tgus);

    for region in regions {
        if let Err(error) = validate_against_unit(region, &configs, layout) {
            panic!(
                "{} region {:#010X}..={:#010X} is invalid: {}",
                region.memory.name(),
                region.start,
                region.end,
                error
            );
        }
    }

    for region in regions {
        let config = configs.get(region.memory);
        let blocks = region.block_range(layout.window(region.memory).base, config.block_size);

        rprintln!(
            "{} {:#010X}..={:#010X} = NS (blocks {}..={} of {} bytes)",
            region.memory.name(),
            region.start,
            region.end,
            blocks.start,
            blocks.end,
            config.block_size.bytes()
        );

        lut::program(tgus.get_mut(region.memory), blocks);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{MemoryType, TcmWindow, DTCM_BASE, ITCM_BASE};
    use crate::tgu::mock::MockTgu;
    use pretty_assertions::assert_eq;

    const LAYOUT: TcmLayout = TcmLayout {
        itcm: TcmWindow::new(ITCM_BASE, 256 * 1024),
        dtcm: TcmWindow::new(DTCM_BASE, 1024 * 1024),
    };

    fn tgus() -> Tgus<MockTgu> {
        Tgus {
            itcm: MockTgu::new(5),
            dtcm: MockTgu::new(7),
        }
    }

    fn dtcm(start: u32, end: u32) -> Region {
        Region::new(start, end, MemoryType::Dtcm)
    }

    #[test]
    fn single_dtcm_region() {
        let mut tgus = tgus();

        configure_non_secure_regions(&mut tgus, &LAYOUT, &[dtcm(0x2000_2000, 0x2000_6FFF)]);

        assert_eq!(tgus.dtcm.lut[0], 0x0000_007C);
        assert_eq!(tgus.dtcm.writes, vec![(0, 0x0000_007C)]);
        assert!(tgus.itcm.writes.is_empty());
    }

    #[test]
    fn region_across_two_words() {
        let mut tgus = tgus();

        // Blocks 30..=35.
        configure_non_secure_regions(&mut tgus, &LAYOUT, &[dtcm(0x2001_E000, 0x2002_3FFF)]);

        assert_eq!(tgus.dtcm.writes, vec![(0, 0xC000_0000), (1, 0x0000_000F)]);
    }

    #[test]
    fn region_with_intermediate_word() {
        let mut tgus = tgus();

        // Blocks 10..=70.
        configure_non_secure_regions(&mut tgus, &LAYOUT, &[dtcm(0x2000_A000, 0x2004_6FFF)]);

        assert_eq!(&tgus.dtcm.lut[..3], &[0xFFFF_FC00, 0xFFFF_FFFF, 0x0000_007F]);
    }

    #[test]
    fn regions_in_both_tcms() {
        let mut tgus = tgus();
        let regions = [
            Region::new(0x0000_0400, 0x0000_07FF, MemoryType::Itcm),
            dtcm(0x2000_0000, 0x2000_0FFF),
        ];

        configure_non_secure_regions(&mut tgus, &LAYOUT, &regions);

        // 1 KiB ITCM blocks 1..=1.
        assert_eq!(tgus.itcm.lut[0], 0x0000_0002);
        assert_eq!(tgus.dtcm.lut[0], 0x0000_0001);
    }

    #[test]
    fn running_twice_changes_nothing() {
        let regions = [dtcm(0x2000_A000, 0x2004_6FFF), dtcm(0x2000_0000, 0x2000_1FFF)];
        let mut once = tgus();
        let mut twice = tgus();

        configure_non_secure_regions(&mut once, &LAYOUT, &regions);
        configure_non_secure_regions(&mut twice, &LAYOUT, &regions);
        configure_non_secure_regions(&mut twice, &LAYOUT, &regions);

        assert_eq!(once.dtcm.lut, twice.dtcm.lut);
    }

    #[test]
    fn region_order_does_not_matter() {
        let a = dtcm(0x2000_0000, 0x2000_1FFF);
        let b = dtcm(0x2002_0000, 0x2003_FFFF);
        let mut ab = tgus();
        let mut ba = tgus();

        configure_non_secure_regions(&mut ab, &LAYOUT, &[a, b]);
        configure_non_secure_regions(&mut ba, &LAYOUT, &[b, a]);

        assert_eq!(ab.dtcm.lut, ba.dtcm.lut);
    }

    #[test]
    fn regions_sharing_a_first_word_accumulate() {
        let mut tgus = tgus();

        // Blocks 0..=3 and 30..=35 both start in word 0.
        let regions = [dtcm(0x2000_0000, 0x2000_3FFF), dtcm(0x2001_E000, 0x2002_3FFF)];
        configure_non_secure_regions(&mut tgus, &LAYOUT, &regions);

        assert_eq!(tgus.dtcm.lut[0], 0xC000_000F);
    }

    #[test]
    fn block_size_is_read_on_every_run() {
        let mut tgus = tgus();
        let region = [dtcm(0x2000_2000, 0x2000_2FFF)];

        configure_non_secure_regions(&mut tgus, &LAYOUT, &region);
        assert_eq!(tgus.dtcm.lut[0], 0x0000_0004);

        // Same region, now 2 KiB blocks 4..=5.
        tgus.dtcm.cfg = 6 | (9 << 8);
        configure_non_secure_regions(&mut tgus, &LAYOUT, &region);

        assert_eq!(tgus.dtcm.lut[0], 0x0000_0034);
        assert_eq!(tgus.dtcm.writes, vec![(0, 0x0000_0004), (0, 0x0000_0034)]);
    }

    #[test]
    fn validate_reports_first_bad_region() {
        let tgus = tgus();
        let regions = [dtcm(0x2000_2000, 0x2000_6FFF), dtcm(0x2000_2800, 0x2000_6FFF)];

        assert_eq!(validate_regions(&tgus, &LAYOUT, &regions[..1]), Ok(()));
        assert_eq!(
            validate_regions(&tgus, &LAYOUT, &regions),
            Err(RegionError::Misaligned {
                address: 0x2000_2800,
                block_size: 4096
            })
        );
    }

    #[test]
    fn validate_uses_block_size_of_region_tcm() {
        let tgus = tgus();

        // Aligned for the 1 KiB ITCM blocks, not for the 4 KiB DTCM blocks.
        let itcm = Region::new(0x0000_0400, 0x0000_07FF, MemoryType::Itcm);
        let same_offset_in_dtcm = dtcm(0x2000_0400, 0x2000_07FF);

        assert_eq!(validate_regions(&tgus, &LAYOUT, &[itcm]), Ok(()));
        assert!(validate_regions(&tgus, &LAYOUT, &[same_offset_in_dtcm]).is_err());
    }

    #[test]
    #[should_panic(expected = "DTCM region 0x20002800..=0x20006FFF is invalid")]
    fn misaligned_region_aborts() {
        let mut tgus = tgus();

        configure_non_secure_regions(&mut tgus, &LAYOUT, &[dtcm(0x2000_2800, 0x2000_6FFF)]);
    }

    #[test]
    fn invalid_region_leaves_lut_untouched() {
        let mut tgus = tgus();
        let regions = [dtcm(0x2000_2000, 0x2000_6FFF), dtcm(0x2010_0000, 0x2010_0FFF)];

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            configure_non_secure_regions(&mut tgus, &LAYOUT, &regions)
        }));

        assert!(result.is_err());
        assert!(tgus.dtcm.writes.is_empty());
    }
}
