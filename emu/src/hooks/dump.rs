use std::fs::File;
use std::io::{BufWriter, Write};

use super::Hook;
use crate::ann::Event;
use crate::error::{Error, Result};

/// Collects events and writes them as YAML when decoding finishes.
#[derive(Debug)]
pub struct Dump {
    file: String,
    events: Vec<Event>,
}

impl Dump {
    pub fn arg(file: String) -> Self {
        Dump {
            file,
            events: Vec::new(),
        }
    }
}

impl Hook for Dump {
    fn init(&mut self) {
        println!(" * Dump: {:?}", self.file);
    }

    fn put(&mut self, event: &Event) {
        self.events.push(event.clone());
    }

    fn fin(&mut self) -> Result<()> {
        let file = File::create(&self.file).map_err(|e| Error::FileCreate(self.file.clone(), e))?;
        let mut buf = BufWriter::new(file);
        serde_yaml::to_writer(&mut buf, &self.events)
            .map_err(|e| Error::Yaml(self.file.clone(), e))?;
        buf.flush()
            .map_err(|e| Error::FileWrite(self.file.clone(), e))?;
        log::info!("Wrote {} events to {}", self.events.len(), self.file);
        Ok(())
    }
}
