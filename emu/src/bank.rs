use serde::Serialize;
use strum::Display;

use crate::ann::{Ann, Event};
use crate::hooks::Hook;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
pub enum Bank {
    #[strum(serialize = "ROM")]
    Rom,
    #[strum(serialize = "SRAM")]
    Sram,
}

impl Bank {
    fn ann(self) -> Ann {
        match self {
            Bank::Rom => Ann::RomBank,
            Bank::Sram => Ann::SramBank,
        }
    }
}

/// Time range during which one bank stayed selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start_sample: u64,
    pub bank: u8,
    pub label: String,
}

/// Active ROM and SRAM banks. Both read as 0x00 until first selected.
#[derive(Debug, Default, Clone)]
pub struct Banks {
    rom: Option<Span>,
    sram: Option<Span>,
}

impl Banks {
    pub fn rom_bank(&self) -> u8 {
        self.rom.as_ref().map_or(0x00, |span| span.bank)
    }

    pub fn sram_bank(&self) -> u8 {
        self.sram.as_ref().map_or(0x00, |span| span.bank)
    }

    pub fn span(&self, bank: Bank) -> Option<&Span> {
        match bank {
            Bank::Rom => self.rom.as_ref(),
            Bank::Sram => self.sram.as_ref(),
        }
    }

    /// Close the running span at `sample` and start a new one there.
    pub fn switch(&mut self, bank: Bank, value: u8, sample: u64, out: &mut dyn Hook) {
        log::debug!("[{:>10}] {} bank {:02X}", sample, bank, value);
        let span = Span {
            start_sample: sample,
            bank: value,
            label: format!("{} Bank: {:02X}", bank, value),
        };
        let slot = match bank {
            Bank::Rom => &mut self.rom,
            Bank::Sram => &mut self.sram,
        };
        if let Some(prev) = slot.replace(span) {
            out.put(&Event::new(prev.start_sample, sample, bank.ann(), prev.label));
        }
    }

    /// Emit the running spans up to `end_sample`.
    pub fn flush(&mut self, end_sample: u64, out: &mut dyn Hook) {
        for bank in [Bank::Rom, Bank::Sram] {
            let slot = match bank {
                Bank::Rom => &mut self.rom,
                Bank::Sram => &mut self.sram,
            };
            if let Some(span) = slot.take() {
                out.put(&Event::new(span.start_sample, end_sample, bank.ann(), span.label));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_bank_zero() {
        let banks = Banks::default();
        assert_eq!(banks.rom_bank(), 0x00);
        assert_eq!(banks.sram_bank(), 0x00);
    }

    #[test]
    fn spans_are_contiguous() {
        let mut banks = Banks::default();
        let mut events: Vec<Event> = vec![];
        banks.switch(Bank::Rom, 0x03, 100, &mut events);
        assert!(events.is_empty());
        assert_eq!(banks.rom_bank(), 0x03);

        banks.switch(Bank::Sram, 0x01, 150, &mut events);
        banks.switch(Bank::Rom, 0x04, 200, &mut events);
        assert_eq!(banks.rom_bank(), 0x04);
        assert_eq!(banks.sram_bank(), 0x01);
        assert_eq!(banks.span(Bank::Sram).map(|s| s.start_sample), Some(150));
        assert_eq!(events, vec![Event::new(100, 200, Ann::RomBank, "ROM Bank: 03")]);

        banks.flush(300, &mut events);
        assert_eq!(
            events[1..],
            [
                Event::new(200, 300, Ann::RomBank, "ROM Bank: 04"),
                Event::new(150, 300, Ann::SramBank, "SRAM Bank: 01"),
            ]
        );
        assert_eq!(banks.rom_bank(), 0x00);
    }
}
