use gbarch::bus::{Cycle, CycleKind};
use gbarch::mem::Mode;
use gbarch::op::{Instruction, Operand};
use gbarch::pin::Pins;
use gbarch::reg::{HardwareConst, MbcReg};
use gbarch::Lookups;
use serde::Serialize;

use crate::bank::Bank;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ReadState {
    #[default]
    Init,
    Incomplete,
    Complete,
}

/// At most one transaction is open at a time.
#[derive(Debug, Clone)]
pub enum Transaction {
    Read(Read),
    Write(Write),
}

// ----------------------------------------------------------------------------
// Read

/// A read spanning an opcode and its operand bytes.
#[derive(Debug, Clone, Serialize)]
pub struct Read {
    pub start_sample: u64,
    pub end_sample: Option<u64>,
    pub cycles: Vec<Cycle>,
    pub mode: Option<Mode>,
    pub symbol: Option<String>,
    pub instruction: Option<Instruction>,
    pub state: ReadState,
    pub special: Option<String>,
}

impl Read {
    pub fn new(sample: u64, pins: &Pins, rom_bank: u8, lookups: &Lookups) -> Self {
        let mut read = Read {
            start_sample: sample,
            end_sample: None,
            cycles: Vec::new(),
            mode: None,
            symbol: None,
            instruction: None,
            state: ReadState::Init,
            special: None,
        };
        let mut cycle = Cycle::decode(sample, pins);
        read.mode = cycle.addr.and_then(Mode::for_read);
        match (read.mode, cycle.addr) {
            (Some(Mode::ReadRom0), Some(addr)) => read.init_rom(&mut cycle, addr, 0x00, lookups),
            (Some(Mode::ReadRomx), Some(addr)) => {
                read.init_rom(&mut cycle, addr, rom_bank, lookups)
            }
            _ => read.state = ReadState::Complete,
        }
        read.cycles.push(cycle);
        read
    }

    fn init_rom(&mut self, cycle: &mut Cycle, addr: u16, bank: u8, lookups: &Lookups) {
        self.symbol = lookups.symbol_for(addr, bank).map(str::to_string);
        self.state = ReadState::Complete;
        if let Some(inst) = cycle.data.and_then(|data| lookups.instruction_for(data)) {
            cycle.kind = CycleKind::Opcode;
            if inst.is_multi_cycle() {
                self.state = ReadState::Incomplete;
            }
            self.instruction = Some(*inst);
        }
    }

    /// Append the next operand byte.
    pub fn next(&mut self, sample: u64, pins: &Pins) {
        let Some(inst) = self.instruction else {
            return;
        };
        if self.state != ReadState::Incomplete {
            return;
        }
        self.cycles
            .push(Cycle::decode(sample, pins).with_kind(CycleKind::Data));
        if self.cycles.len() >= inst.length as usize {
            self.state = ReadState::Complete;
        }
    }

    /// Absolute operands are resolved through `sram_bank`, not the ROM bank.
    pub fn close(&mut self, end_sample: u64, sram_bank: u8, lookups: &Lookups) {
        if let Some(inst) = self.instruction {
            if inst.operand == Operand::Absolute16 {
                if let Some(sym) = self.operand16().and_then(|a| lookups.symbol_for(a, sram_bank)) {
                    self.special = Some(format!("{} ({})", inst.mnemonic, sym));
                }
            }
        }
        self.end_sample = Some(end_sample);
    }

    pub fn is_incomplete(&self) -> bool {
        self.state == ReadState::Incomplete
    }

    pub fn operand16(&self) -> Option<u16> {
        let lo = self.cycles.get(1)?.data?;
        let hi = self.cycles.get(2)?.data?;
        Some(u16::from_le_bytes([lo, hi]))
    }

    /// Decoded instruction text, with the operand's symbol when one resolved.
    pub fn code(&self) -> Option<&str> {
        match (&self.special, &self.instruction) {
            (Some(special), _) => Some(special.as_str()),
            (None, Some(inst)) => Some(inst.mnemonic),
            (None, None) => None,
        }
    }

    pub fn end(&self) -> u64 {
        self.end_sample.unwrap_or(self.start_sample)
    }

    /// A cycle lasts until the next one starts; the last one until the read closes.
    pub fn sub_end(&self, idx: usize) -> u64 {
        match self.cycles.get(idx + 1) {
            Some(next) => next.sample,
            None => self.end(),
        }
    }
}

// ----------------------------------------------------------------------------
// Write

#[derive(Debug, Clone, Serialize)]
pub struct Write {
    pub start_sample: u64,
    pub end_sample: Option<u64>,
    pub cycle: Cycle,
    pub mode: Option<Mode>,
    pub symbol: Option<String>,
    pub hardware_const: Option<HardwareConst>,
}

impl Write {
    pub fn new(sample: u64, pins: &Pins, sram_bank: u8, lookups: &Lookups) -> Self {
        let mut cycle = Cycle::decode(sample, pins);
        let mut mode = None;
        let mut symbol = None;
        let mut hardware_const = None;
        if let Some(addr) = cycle.addr {
            mode = Mode::for_write(addr);
            if mode.is_some() {
                cycle.kind = CycleKind::Data;
                symbol = lookups.symbol_for(addr, sram_bank).map(str::to_string);
            }
            hardware_const = lookups.hardware_const_for(addr).copied();
        }
        Write {
            start_sample: sample,
            end_sample: None,
            cycle,
            mode,
            symbol,
            hardware_const,
        }
    }

    pub fn close(&mut self, end_sample: u64) {
        self.end_sample = Some(end_sample);
    }

    pub fn end(&self) -> u64 {
        self.end_sample.unwrap_or(self.start_sample)
    }

    /// Name of the written value, e.g. `SRAM_ENABLE`.
    pub fn meaning(&self) -> Option<&'static str> {
        self.hardware_const?.meaning(self.cycle.data?)
    }

    /// Bank selected by this write, if it targets a bank register with driven data.
    pub fn bank_switch(&self) -> Option<(Bank, u8)> {
        let data = self.cycle.data?;
        match self.hardware_const?.reg {
            MbcReg::RomBank => Some((Bank::Rom, data)),
            MbcReg::SramBank => Some((Bank::Sram, data)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gbarch::sym::Symbols;

    fn lookups() -> Lookups {
        let mut symbols = Symbols::default();
        symbols.insert(0x00, 0x0150, "Start");
        symbols.insert(0x03, 0x5000, "MyFunc");
        symbols.insert(0x01, 0xA000, "wPlayerX");
        Lookups::with_symbols(symbols)
    }

    #[test]
    fn read_out_of_window_is_complete() {
        let read = Read::new(0, &Pins::from_bus(0xC000, 0xcd), 0, &lookups());
        assert_eq!(read.mode, None);
        assert_eq!(read.state, ReadState::Complete);
        assert_eq!(read.instruction, None);
        assert_eq!(read.cycles.len(), 1);
    }

    #[test]
    fn read_rom0_ignores_rom_bank() {
        let read = Read::new(0, &Pins::from_bus(0x0150, 0x00), 0x03, &lookups());
        assert_eq!(read.mode, Some(Mode::ReadRom0));
        assert_eq!(read.symbol.as_deref(), Some("Start"));
        assert_eq!(read.state, ReadState::Complete);
    }

    #[test]
    fn read_assembles_operands() {
        let lookups = lookups();
        let mut read = Read::new(10, &Pins::from_bus(0x4100, 0xcd), 0x03, &lookups);
        assert_eq!(read.state, ReadState::Incomplete);
        assert_eq!(read.cycles[0].kind, CycleKind::Opcode);

        read.next(20, &Pins::from_bus(0x4101, 0x00));
        assert!(read.is_incomplete());
        read.next(30, &Pins::from_bus(0x4102, 0x50));
        assert_eq!(read.state, ReadState::Complete);
        assert_eq!(read.cycles[2].kind, CycleKind::Data);

        // complete reads take no more bytes
        read.next(40, &Pins::from_bus(0x4103, 0x00));
        assert_eq!(read.cycles.len(), 3);

        assert_eq!(read.operand16(), Some(0x5000));
        read.close(50, 0x03, &lookups);
        assert_eq!(read.code(), Some("call nn (MyFunc)"));
        assert_eq!(read.sub_end(0), 20);
        assert_eq!(read.sub_end(2), 50);
    }

    #[test]
    fn operand_resolves_through_sram_bank() {
        let lookups = lookups();
        let mut read = Read::new(0, &Pins::from_bus(0x4100, 0xc3), 0x03, &lookups);
        read.next(1, &Pins::from_bus(0x4101, 0x00));
        read.next(2, &Pins::from_bus(0x4102, 0x50));
        read.close(3, 0x00, &lookups);
        assert_eq!(read.code(), Some("jp nn"));
    }

    #[test]
    fn truncated_read_keeps_mnemonic() {
        let lookups = lookups();
        let mut read = Read::new(0, &Pins::from_bus(0x4100, 0xcd), 0x03, &lookups);
        read.next(1, &Pins::from_bus(0x4101, 0x00));
        read.close(2, 0x03, &lookups);
        assert_eq!(read.operand16(), None);
        assert_eq!(read.code(), Some("call nn"));
    }

    #[test]
    fn write_sram_symbol() {
        let write = Write::new(0, &Pins::from_bus(0xA000, 0x12), 0x01, &lookups());
        assert_eq!(write.mode, Some(Mode::WriteSram));
        assert_eq!(write.symbol.as_deref(), Some("wPlayerX"));
        assert_eq!(write.hardware_const.map(|h| h.reg), Some(MbcReg::Rtc));
        assert_eq!(write.bank_switch(), None);
    }

    #[test]
    fn write_bank_switch() {
        let write = Write::new(0, &Pins::from_bus(0x2000, 0x03), 0x00, &lookups());
        assert_eq!(write.mode, None);
        assert_eq!(write.bank_switch(), Some((Bank::Rom, 0x03)));

        let write = Write::new(0, &Pins::from_bus(0x4000, 0x02), 0x00, &lookups());
        assert_eq!(write.bank_switch(), Some((Bank::Sram, 0x02)));
    }
}
