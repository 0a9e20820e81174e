//! Text capture format, one sample per line:
//!
//! ```text
//! # sample  ctrl  A15..A0           D7..D0
//!   1200    1011  0101000000000000  11001101
//! ```
//!
//! `ctrl` holds /CLK, /RD, /WR, /CS in that order. Each level is `0`, `1`
//! or `x` for an unassigned channel. Blank lines and `#` comments are skipped.
//!
//! Raw analyzer dumps are read by [`RawFrames`] instead.

use std::io::{BufRead, ErrorKind, Read};

use gbarch::pin::{Level, Pin, Pins, PIN_COUNT};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Falling clock with /RD low and /WR high.
    StartRead,
    /// Falling clock with /RD high and /WR falling.
    StartWrite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub sample: u64,
    pub pins: Pins,
}

const CTRL: [Pin; 4] = [Pin::CLK, Pin::RD, Pin::WR, Pin::CS];

impl Frame {
    pub fn parse(line: &str) -> std::result::Result<Option<Frame>, String> {
        let code = match line.split_once('#') {
            Some((code, _comment)) => code,
            None => line,
        };
        let words: Vec<&str> = code.split_whitespace().collect();
        let (sample, ctrl, addr, data) = match words[..] {
            [] => return Ok(None),
            [sample, ctrl, addr, data] => (sample, ctrl, addr, data),
            _ => return Err(format!("expected 4 fields, found {}", words.len())),
        };

        let sample = sample
            .parse::<u64>()
            .map_err(|e| format!("sample `{}`: {}", sample, e))?;

        let mut pins = Pins::default();
        for (pin, level) in CTRL.iter().zip(levels(ctrl, 4)?) {
            pins.set(*pin, level);
        }
        // bus fields are written most significant line first
        for (pin, level) in ADDR_PINS.iter().rev().zip(levels(addr, 16)?) {
            pins.set(*pin, level);
        }
        for (pin, level) in DATA_PINS.iter().rev().zip(levels(data, 8)?) {
            pins.set(*pin, level);
        }
        Ok(Some(Frame { sample, pins }))
    }
}

const ADDR_PINS: [Pin; 16] = [
    Pin::A0,
    Pin::A1,
    Pin::A2,
    Pin::A3,
    Pin::A4,
    Pin::A5,
    Pin::A6,
    Pin::A7,
    Pin::A8,
    Pin::A9,
    Pin::A10,
    Pin::A11,
    Pin::A12,
    Pin::A13,
    Pin::A14,
    Pin::A15,
];

const DATA_PINS: [Pin; 8] = [
    Pin::D0,
    Pin::D1,
    Pin::D2,
    Pin::D3,
    Pin::D4,
    Pin::D5,
    Pin::D6,
    Pin::D7,
];

fn levels(field: &str, width: usize) -> std::result::Result<Vec<Level>, String> {
    if field.chars().count() != width {
        return Err(format!("`{}` should be {} levels wide", field, width));
    }
    field
        .chars()
        .map(|c| Level::parse(c).ok_or_else(|| format!("bad level `{}` in `{}`", c, field)))
        .collect()
}

/// Streams frames out of a capture reader.
pub struct Frames<R> {
    lines: std::io::Lines<R>,
    line_no: usize,
}

impl<R: BufRead> Frames<R> {
    pub fn new(reader: R) -> Self {
        Frames {
            lines: reader.lines(),
            line_no: 0,
        }
    }
}

impl<R: BufRead> Iterator for Frames<R> {
    type Item = Result<Frame>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(Error::FileRead(e))),
            };
            self.line_no += 1;
            match Frame::parse(&line) {
                Ok(Some(frame)) => return Some(Ok(frame)),
                Ok(None) => continue,
                Err(reason) => return Some(Err(Error::Capture(self.line_no, reason))),
            }
        }
    }
}

/// Streams frames out of a raw analyzer dump.
///
/// Each sample is one record of `PIN_COUNT` bytes in `Pin` order, one byte
/// per channel: `0x00`, `0x01`, or `0xFF` for an unassigned channel. The
/// sample index is the record number.
pub struct RawFrames<R> {
    reader: R,
    sample: u64,
}

impl<R: Read> RawFrames<R> {
    pub fn new(reader: R) -> Self {
        RawFrames { reader, sample: 0 }
    }

    /// Like `read_exact`, but reports how much was read before end of input.
    fn fill(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }
}

impl<R: Read> Iterator for RawFrames<R> {
    type Item = Result<Frame>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut raw = [0u8; PIN_COUNT];
        let sample = self.sample;
        match self.fill(&mut raw) {
            Ok(0) => return None,
            Ok(n) if n < PIN_COUNT => {
                let reason = format!("truncated record ({} of {} bytes)", n, PIN_COUNT);
                return Some(Err(Error::RawCapture(sample, reason)));
            }
            Ok(_) => {}
            Err(e) => return Some(Err(Error::FileRead(e))),
        }
        self.sample += 1;
        Some(match Pins::from_raw(&raw) {
            Some(pins) => Ok(Frame { sample, pins }),
            None => Err(Error::RawCapture(
                sample,
                format!("level byte other than 00, 01 or FF in {:02X?}", raw),
            )),
        })
    }
}

/// Matches strobe edges between consecutive samples.
#[derive(Debug, Default)]
pub struct EdgeDetector {
    prev: Option<Pins>,
}

impl EdgeDetector {
    pub fn feed(&mut self, pins: &Pins) -> Option<Trigger> {
        let prev = self.prev.replace(*pins)?;
        let fell = |pin: Pin| prev.get(pin) == Level::High && pins.get(pin) == Level::Low;
        if !fell(Pin::CLK) {
            return None;
        }
        match (pins.get(Pin::RD), pins.get(Pin::WR)) {
            (Level::Low, Level::High) => Some(Trigger::StartRead),
            (Level::High, Level::Low) if fell(Pin::WR) => Some(Trigger::StartWrite),
            _ => None,
        }
    }

    pub fn reset(&mut self) {
        self.prev = None;
    }
}
