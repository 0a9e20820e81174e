//! Cartridge-visible memory map.
//!
//! ```text
//! $A000-$BFFF  Cartridge RAM (if available)
//! $4000-$7FFF  Cartridge ROM - switchable banks 1-xx
//! $0150-$3FFF  Cartridge ROM - bank 0 (fixed)
//! $0100-$014F  Cartridge header
//! $0000-$00FF  Restart and interrupt vectors
//! ```

use std::ops::RangeInclusive;

use serde::Serialize;
use strum::Display;

pub const ROM0: RangeInclusive<u16> = 0x0150..=0x3FFF;
pub const ROMX: RangeInclusive<u16> = 0x4000..=0x7FFF;
pub const SRAM: RangeInclusive<u16> = 0xA000..=0xBFFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
pub enum Mode {
    #[strum(serialize = "READ_ROM0")]
    ReadRom0,
    #[strum(serialize = "READ_ROMX")]
    ReadRomx,
    #[strum(serialize = "WRITE_SRAM")]
    WriteSram,
}

impl Mode {
    pub fn for_read(addr: u16) -> Option<Mode> {
        if ROM0.contains(&addr) {
            Some(Mode::ReadRom0)
        } else if ROMX.contains(&addr) {
            Some(Mode::ReadRomx)
        } else {
            None
        }
    }

    pub fn for_write(addr: u16) -> Option<Mode> {
        SRAM.contains(&addr).then_some(Mode::WriteSram)
    }
}

#[test]
fn windows() {
    assert_eq!(Mode::for_read(0x0100), None);
    assert_eq!(Mode::for_read(0x0150), Some(Mode::ReadRom0));
    assert_eq!(Mode::for_read(0x3FFF), Some(Mode::ReadRom0));
    assert_eq!(Mode::for_read(0x4000), Some(Mode::ReadRomx));
    assert_eq!(Mode::for_read(0x7FFF), Some(Mode::ReadRomx));
    assert_eq!(Mode::for_read(0xA000), None);
    assert_eq!(Mode::for_write(0xA000), Some(Mode::WriteSram));
    assert_eq!(Mode::for_write(0xBFFF), Some(Mode::WriteSram));
    assert_eq!(Mode::for_write(0x2000), None);
}
