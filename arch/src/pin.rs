use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};
use strum::Display;

pub const PIN_COUNT: usize = 28;

/// Logic analyzer channel layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[repr(u8)]
pub enum Pin {
    CLK,
    RD,
    WR,
    CS,
    A0,
    A1,
    A2,
    A3,
    A4,
    A5,
    A6,
    A7,
    A8,
    A9,
    A10,
    A11,
    A12,
    A13,
    A14,
    A15,
    D0,
    D1,
    D2,
    D3,
    D4,
    D5,
    D6,
    D7,
}

impl Pin {
    pub const ADDR: std::ops::Range<usize> = Pin::A0 as usize..Pin::A15 as usize + 1;
    pub const DATA: std::ops::Range<usize> = Pin::D0 as usize..Pin::D7 as usize + 1;
}

/// Sampled level of one channel.
/// `Unassigned` is the analyzer's marker for a channel that is not wired up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, TryFromPrimitive)]
#[repr(u8)]
pub enum Level {
    #[default]
    Low = 0x00,
    High = 0x01,
    Unassigned = 0xFF,
}

impl Level {
    pub fn parse(c: char) -> Option<Self> {
        match c {
            '0' => Some(Level::Low),
            '1' => Some(Level::High),
            'x' | 'X' => Some(Level::Unassigned),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pins([Level; PIN_COUNT]);

impl Pins {
    pub fn new(levels: [Level; PIN_COUNT]) -> Self {
        Pins(levels)
    }

    /// Build from raw analyzer bytes (0x00, 0x01 or 0xFF per channel).
    pub fn from_raw(raw: &[u8; PIN_COUNT]) -> Option<Self> {
        let mut levels = [Level::Low; PIN_COUNT];
        for (level, byte) in levels.iter_mut().zip(raw) {
            *level = Level::try_from(*byte).ok()?;
        }
        Some(Pins(levels))
    }

    /// Pins with the given address and data driven onto the bus.
    /// Control lines are left low.
    pub fn from_bus(addr: u16, data: u8) -> Self {
        let mut pins = Pins::default();
        for (bit, idx) in Pin::ADDR.enumerate() {
            pins.0[idx] = bit_level(addr as u32, bit);
        }
        for (bit, idx) in Pin::DATA.enumerate() {
            pins.0[idx] = bit_level(data as u32, bit);
        }
        pins
    }

    pub fn get(&self, pin: Pin) -> Level {
        self.0[pin as usize]
    }

    pub fn set(&mut self, pin: Pin, level: Level) {
        self.0[pin as usize] = level;
    }

    pub fn addr(&self) -> Option<u16> {
        reduce_bus(&self.0[Pin::ADDR]).map(|v| v as u16)
    }

    pub fn data(&self) -> Option<u8> {
        reduce_bus(&self.0[Pin::DATA]).map(|v| v as u8)
    }
}

fn bit_level(value: u32, bit: usize) -> Level {
    match (value >> bit) & 1 {
        0 => Level::Low,
        _ => Level::High,
    }
}

/// Fold bus lines (least significant first) into a value.
/// Any unassigned line makes the whole bus unassigned.
pub fn reduce_bus(lines: &[Level]) -> Option<u32> {
    lines.iter().rev().try_fold(0u32, |acc, level| match level {
        Level::Low => Some(acc << 1),
        Level::High => Some(acc << 1 | 1),
        Level::Unassigned => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduce_lsb_first() {
        use Level::*;
        assert_eq!(reduce_bus(&[High, Low, Low, Low]), Some(0b0001));
        assert_eq!(reduce_bus(&[Low, High, High, Low]), Some(0b0110));
        assert_eq!(reduce_bus(&[Low, Low, Unassigned, Low]), None);
    }

    #[test]
    fn bus_layout() {
        let pins = Pins::from_bus(0x5000, 0xcd);
        assert_eq!(pins.addr(), Some(0x5000));
        assert_eq!(pins.data(), Some(0xcd));
        assert_eq!(pins.get(Pin::A12), Level::High);
        assert_eq!(pins.get(Pin::A14), Level::High);
        assert_eq!(pins.get(Pin::D0), Level::High);
        assert_eq!(pins.get(Pin::D1), Level::Low);
    }

    #[test]
    fn unassigned_is_not_zero() {
        let mut pins = Pins::from_bus(0x0000, 0x00);
        pins.set(Pin::A3, Level::Unassigned);
        assert_eq!(pins.addr(), None);
        assert_eq!(pins.data(), Some(0x00));

        pins.set(Pin::D7, Level::Unassigned);
        assert_eq!(pins.data(), None);
    }

    #[test]
    fn raw_bytes() {
        let mut raw = [0u8; PIN_COUNT];
        raw[Pin::A0 as usize] = 0x01;
        raw[Pin::D0 as usize] = 0xFF;
        let pins = Pins::from_raw(&raw).unwrap();
        assert_eq!(pins.addr(), Some(0x0001));
        assert_eq!(pins.data(), None);

        raw[Pin::CLK as usize] = 0x02;
        assert_eq!(Pins::from_raw(&raw), None);
    }
}
