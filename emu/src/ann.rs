use num_enum::IntoPrimitive;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, EnumString};

use crate::hooks::Hook;
use crate::model::{Read, Write};

/// Annotation channels.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    IntoPrimitive,
    Display,
    EnumString,
    EnumIter,
    EnumCount,
)]
#[repr(u8)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Ann {
    Addr,
    Rd,
    Wr,
    Sym,
    WrFunc,
    Code,
    Const,
    RomBank,
    SramBank,
}

impl Ann {
    pub fn desc(self) -> &'static str {
        match self {
            Ann::Addr => "Address",
            Ann::Rd => "Byte read",
            Ann::Wr => "Byte written",
            Ann::Sym => "Symbol",
            Ann::WrFunc => "Write Function",
            Ann::Code => "Code",
            Ann::Const => "Constant",
            Ann::RomBank => "ROM Bank",
            Ann::SramBank => "SRAM Bank",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub start: u64,
    pub end: u64,
    pub ann: Ann,
    pub text: String,
}

impl Event {
    pub fn new(start: u64, end: u64, ann: Ann, text: impl Into<String>) -> Self {
        Event {
            start,
            end,
            ann,
            text: text.into(),
        }
    }
}

pub fn fmt_addr(addr: Option<u16>) -> String {
    match addr {
        Some(addr) => format!("{:04X}", addr),
        None => "----".to_string(),
    }
}

pub fn fmt_data(data: Option<u8>) -> String {
    match data {
        Some(data) => format!("{:02X}", data),
        None => "--".to_string(),
    }
}

pub fn put_read(read: &Read, out: &mut dyn Hook) {
    for (idx, cycle) in read.cycles.iter().enumerate() {
        let end = read.sub_end(idx);
        out.put(&Event::new(cycle.sample, end, Ann::Addr, fmt_addr(cycle.addr)));
        out.put(&Event::new(cycle.sample, end, Ann::Rd, fmt_data(cycle.data)));
    }
    if let Some(symbol) = &read.symbol {
        out.put(&Event::new(read.start_sample, read.end(), Ann::Sym, symbol));
    }
    if let Some(code) = read.code() {
        out.put(&Event::new(read.start_sample, read.end(), Ann::Code, code));
    }
}

pub fn put_write(write: &Write, out: &mut dyn Hook) {
    let (start, end) = (write.start_sample, write.end());
    out.put(&Event::new(start, end, Ann::Addr, fmt_addr(write.cycle.addr)));
    out.put(&Event::new(start, end, Ann::Wr, fmt_data(write.cycle.data)));

    if let Some(symbol) = &write.symbol {
        out.put(&Event::new(start, end, Ann::Sym, symbol));
    } else if let Some(hw) = &write.hardware_const {
        out.put(&Event::new(start, end, Ann::WrFunc, hw.name));
        if let Some(meaning) = write.meaning() {
            out.put(&Event::new(start, end, Ann::Const, meaning));
        }
    }
}
