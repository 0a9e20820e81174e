use gbarch::pin::Pins;
use gbarch::Lookups;

use crate::ann;
use crate::bank::Banks;
use crate::capture::{EdgeDetector, Frame, Trigger};
use crate::error::Result;
use crate::filter::FilterRegistry;
use crate::hooks::Hook;
use crate::model::{Read, Transaction, Write};

/// Decoding state for one capture.
///
/// Holds the single open transaction and the bank context. Closed
/// transactions are rendered into the hook passed to each call.
pub struct Session<'a> {
    lookups: &'a Lookups,
    filters: FilterRegistry,
    open: Option<Transaction>,
    banks: Banks,
}

impl<'a> Session<'a> {
    pub fn new(lookups: &'a Lookups, filters: FilterRegistry) -> Self {
        Session {
            lookups,
            filters,
            open: None,
            banks: Banks::default(),
        }
    }

    /// Back to the state of a fresh session.
    pub fn reset(&mut self) {
        self.open = None;
        self.banks = Banks::default();
        self.filters.reset();
    }

    pub fn open(&self) -> Option<&Transaction> {
        self.open.as_ref()
    }

    pub fn banks(&self) -> &Banks {
        &self.banks
    }

    pub fn step(&mut self, trigger: Trigger, sample: u64, pins: &Pins, out: &mut dyn Hook) {
        match trigger {
            Trigger::StartRead => self.read(sample, pins, out),
            Trigger::StartWrite => self.write(sample, pins, out),
        }
    }

    pub fn read(&mut self, sample: u64, pins: &Pins, out: &mut dyn Hook) {
        if let Some(Transaction::Read(read)) = self.open.as_mut() {
            if read.is_incomplete() {
                read.next(sample, pins);
                return;
            }
        }
        self.close_open(sample, out);
        let read = Read::new(sample, pins, self.banks.rom_bank(), self.lookups);
        log::trace!("[{:>10}] read {:?} {:?}", sample, read.mode, read.state);
        self.open = Some(Transaction::Read(read));
    }

    pub fn write(&mut self, sample: u64, pins: &Pins, out: &mut dyn Hook) {
        self.close_open(sample, out);
        let write = Write::new(sample, pins, self.banks.sram_bank(), self.lookups);
        log::trace!("[{:>10}] write {:?}", sample, write.hardware_const.map(|h| h.name));
        if let Some((bank, value)) = write.bank_switch() {
            self.banks.switch(bank, value, sample, out);
        }
        self.open = Some(Transaction::Write(write));
    }

    /// Close whatever is open so a new transaction can start at `sample`.
    pub fn close_open(&mut self, sample: u64, out: &mut dyn Hook) {
        match self.open.take() {
            Some(Transaction::Read(mut read)) => {
                read.close(sample, self.banks.sram_bank(), self.lookups);
                if self.filters.admit(&read) {
                    ann::put_read(&read, out);
                }
            }
            Some(Transaction::Write(mut write)) => {
                write.close(sample);
                if self.filters.collecting() {
                    ann::put_write(&write, out);
                }
            }
            None => {}
        }
    }

    /// End of capture: close the open transaction and the running bank spans.
    pub fn finish(&mut self, end_sample: u64, out: &mut dyn Hook) {
        self.close_open(end_sample, out);
        self.banks.flush(end_sample, out);
    }

    /// Run a whole capture through the session.
    pub fn decode<I>(&mut self, frames: I, out: &mut dyn Hook) -> Result<u64>
    where
        I: IntoIterator<Item = Result<Frame>>,
    {
        let mut edges = EdgeDetector::default();
        let mut last = 0;
        let mut triggers = 0;
        for frame in frames {
            let frame = frame?;
            last = frame.sample;
            if let Some(trigger) = edges.feed(&frame.pins) {
                self.step(trigger, frame.sample, &frame.pins, out);
                triggers += 1;
            }
        }
        self.finish(last, out);
        log::info!("Decoded {} strobes up to sample {}", triggers, last);
        Ok(triggers)
    }
}
