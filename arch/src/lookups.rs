use std::collections::HashMap;

use crate::op::{Instruction, INSTRUCTIONS};
use crate::reg::{HardwareConst, HARDWARE_CONSTS};
use crate::sym::Symbols;

/// Read-only tables consulted while decoding. Built once, shared by reference.
#[derive(Debug, Clone)]
pub struct Lookups {
    instructions: HashMap<u8, Instruction>,
    hardware: HashMap<u16, HardwareConst>,
    symbols: Symbols,
}

impl Lookups {
    pub fn new(instructions: &[Instruction], hardware: &[HardwareConst], symbols: Symbols) -> Self {
        Lookups {
            instructions: instructions.iter().map(|i| (i.opcode, *i)).collect(),
            hardware: hardware.iter().map(|h| (h.addr, *h)).collect(),
            symbols,
        }
    }

    /// Default instruction and MBC3 tables with the given symbols.
    pub fn with_symbols(symbols: Symbols) -> Self {
        Lookups::new(INSTRUCTIONS, &HARDWARE_CONSTS, symbols)
    }

    pub fn instruction_for(&self, opcode: u8) -> Option<&Instruction> {
        self.instructions.get(&opcode)
    }

    pub fn hardware_const_for(&self, addr: u16) -> Option<&HardwareConst> {
        self.hardware.get(&addr)
    }

    /// `bank` may be a ROM or SRAM bank; both share one symbol table.
    pub fn symbol_for(&self, addr: u16, bank: u8) -> Option<&str> {
        self.symbols.get(addr, bank)
    }
}

impl Default for Lookups {
    fn default() -> Self {
        Lookups::with_symbols(Symbols::default())
    }
}

#[test]
fn lookups() {
    let mut symbols = Symbols::default();
    symbols.insert(0x03, 0x5000, "MyFunc");
    let lookups = Lookups::with_symbols(symbols);

    assert_eq!(lookups.instruction_for(0xcd).map(|i| i.mnemonic), Some("call nn"));
    assert_eq!(lookups.instruction_for(0x00), None);
    assert_eq!(
        lookups.hardware_const_for(0x0000).map(|h| h.name),
        Some("MBC3SRamEnable")
    );
    assert_eq!(lookups.hardware_const_for(0x1234), None);
    assert_eq!(lookups.symbol_for(0x5000, 0x03), Some("MyFunc"));
    assert_eq!(lookups.symbol_for(0x5000, 0x01), None);
}
