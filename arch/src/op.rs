use serde::Serialize;
use strum::Display;

/// How an instruction's operand bytes should be interpreted
/// when the read is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Display)]
pub enum Operand {
    #[default]
    None,
    /// Little-endian 16-bit address in the two bytes after the opcode.
    Absolute16,
}

/// `length` counts bus reads, opcode included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Instruction {
    pub opcode: u8,
    pub length: u8,
    pub mnemonic: &'static str,
    pub operand: Operand,
}

macro_rules! inst {
    ($opcode:expr, $length:expr, $mnemonic:expr) => {
        inst!($opcode, $length, $mnemonic, None)
    };
    ($opcode:expr, $length:expr, $mnemonic:expr, $operand:ident) => {
        Instruction {
            opcode: $opcode,
            length: $length,
            mnemonic: $mnemonic,
            operand: Operand::$operand,
        }
    };
}

pub const INSTRUCTIONS: &[Instruction] = &[
    // 8 bit loads
    inst!(0x3e, 2, "ld a, #"),
    inst!(0x7e, 2, "ld a, [hl]"),
    // 16 bit loads
    inst!(0x21, 3, "ld hl, nn", Absolute16),
    inst!(0xea, 4, "ld [nn], a", Absolute16),
    // compare
    inst!(0xfe, 2, "cp #"),
    // jumps
    inst!(0xc3, 3, "jp nn", Absolute16),
    inst!(0xc2, 3, "jp NZ, nn", Absolute16),
    inst!(0xca, 3, "jp Z, nn", Absolute16),
    inst!(0x18, 2, "jp n"),
    // calls
    inst!(0xcd, 3, "call nn", Absolute16),
    inst!(0xc7, 8, "rst 0x00"),
];

impl Instruction {
    pub fn is_multi_cycle(&self) -> bool {
        self.length > 1
    }
}

#[test]
fn multi_cycle() {
    let single: Vec<u8> = INSTRUCTIONS
        .iter()
        .filter(|inst| !inst.is_multi_cycle())
        .map(|inst| inst.opcode)
        .collect();
    assert!(single.is_empty(), "single-cycle entries {:02x?}", single);
}

#[test]
fn opcodes_are_unique() {
    for (idx, inst) in INSTRUCTIONS.iter().enumerate() {
        assert!(
            INSTRUCTIONS[idx + 1..].iter().all(|o| o.opcode != inst.opcode),
            "duplicate opcode {:02x}",
            inst.opcode
        );
    }
}

#[test]
fn absolute_operands_fit() {
    for inst in INSTRUCTIONS {
        if inst.operand == Operand::Absolute16 {
            assert!(inst.length >= 3, "{} is too short", inst.mnemonic);
        }
    }
}
