use once_cell::sync::Lazy;
use serde::Serialize;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// MBC3 control registers.
/// Pan Docs: http://nocash.emubase.de/pandocs.htm
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
pub enum MbcReg {
    #[strum(serialize = "MBC3SRamEnable")]
    SramEnable,
    #[strum(serialize = "MBC3RomBank")]
    RomBank,
    #[strum(serialize = "MBC3SRamBank")]
    SramBank,
    #[strum(serialize = "MBC3LatchClock")]
    LatchClock,
    #[strum(serialize = "MBC3RTC")]
    Rtc,
}

impl MbcReg {
    pub fn addr(self) -> u16 {
        match self {
            MbcReg::SramEnable => 0x0000,
            MbcReg::RomBank => 0x2000,
            MbcReg::SramBank => 0x4000,
            MbcReg::LatchClock => 0x6000,
            MbcReg::Rtc => 0xA000,
        }
    }

    fn meanings(self) -> &'static [(u8, &'static str)] {
        match self {
            MbcReg::SramEnable => &[(0x0A, "SRAM_ENABLE"), (0x00, "SRAM_DISABLE")],
            MbcReg::LatchClock => &[(0x01, "LATCH_CLOCK"), (0x00, "RESET_LATCH")],
            MbcReg::RomBank | MbcReg::SramBank | MbcReg::Rtc => &[],
        }
    }

    pub fn descriptor(self) -> HardwareConst {
        HardwareConst {
            reg: self,
            name: self.into(),
            addr: self.addr(),
            data: self.meanings(),
        }
    }
}

/// A control register address and the names of the values written to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HardwareConst {
    pub reg: MbcReg,
    pub name: &'static str,
    pub addr: u16,
    pub data: &'static [(u8, &'static str)],
}

impl HardwareConst {
    pub fn meaning(&self, data: u8) -> Option<&'static str> {
        self.data
            .iter()
            .find(|(value, _)| *value == data)
            .map(|(_, name)| *name)
    }
}

pub static HARDWARE_CONSTS: Lazy<Vec<HardwareConst>> =
    Lazy::new(|| MbcReg::iter().map(MbcReg::descriptor).collect());

#[test]
fn addresses_are_distinct() {
    let addrs: Vec<u16> = HARDWARE_CONSTS.iter().map(|h| h.addr).collect();
    assert_eq!(addrs, [0x0000, 0x2000, 0x4000, 0x6000, 0xA000]);
    for reg in MbcReg::iter() {
        assert_eq!(reg.descriptor().addr, reg.addr());
    }
}

#[test]
fn meanings() {
    let enable = MbcReg::SramEnable.descriptor();
    assert_eq!(enable.name, "MBC3SRamEnable");
    assert_eq!(enable.meaning(0x0A), Some("SRAM_ENABLE"));
    assert_eq!(enable.meaning(0x00), Some("SRAM_DISABLE"));
    assert_eq!(enable.meaning(0x01), None);

    let latch = MbcReg::LatchClock.descriptor();
    assert_eq!(latch.addr, 0x6000);
    assert_eq!(latch.meaning(0x01), Some("LATCH_CLOCK"));

    assert_eq!(MbcReg::RomBank.descriptor().meaning(0x03), None);
    assert_eq!("MBC3SRamBank".parse::<MbcReg>(), Ok(MbcReg::SramBank));
}
