use color_print::cprintln;
use strum::{EnumCount, IntoEnumIterator};

use super::Hook;
use crate::ann::{Ann, Event};

/// Prints events to the terminal, one per line.
pub struct Print {
    only: Vec<Ann>,
    count: [usize; Ann::COUNT],
}

impl Print {
    /// An empty `only` prints every channel.
    pub fn arg(only: Vec<Ann>) -> Self {
        Print { only, count: [0; Ann::COUNT] }
    }

    fn shows(&self, ann: Ann) -> bool {
        self.only.is_empty() || self.only.contains(&ann)
    }
}

impl Hook for Print {
    fn init(&mut self) {
        if !self.only.is_empty() {
            let names: Vec<String> = self.only.iter().map(Ann::to_string).collect();
            println!(" * Print: {}", names.join(", "));
        }
    }

    fn put(&mut self, event: &Event) {
        if !self.shows(event.ann) {
            return;
        }
        self.count[u8::from(event.ann) as usize] += 1;
        let span = format!("{:>10} - {:<10}", event.start, event.end);
        let name = format!("{:<9}", event.ann);
        match event.ann {
            Ann::Addr => cprintln!("<dim>{}</> {} <b>{}</>", span, name, event.text),
            Ann::Rd | Ann::Wr => cprintln!("<dim>{}</> {} <c>{}</>", span, name, event.text),
            Ann::Sym => cprintln!("<dim>{}</> {} <g,s>{}</>", span, name, event.text),
            Ann::WrFunc | Ann::Const => cprintln!("<dim>{}</> {} <y>{}</>", span, name, event.text),
            Ann::Code => cprintln!("<dim>{}</> {} <r>{}</>", span, name, event.text),
            Ann::RomBank | Ann::SramBank => {
                cprintln!("<dim>{}</> {} <m,s>{}</>", span, name, event.text)
            }
        }
    }

    fn fin(&mut self) -> crate::error::Result<()> {
        println!(" * Printed {} events", self.count.iter().sum::<usize>());
        for ann in Ann::iter().filter(|ann| self.count[u8::from(*ann) as usize] > 0) {
            println!("   - {:<16} {:>8}", ann.desc(), self.count[u8::from(ann) as usize]);
        }
        Ok(())
    }
}
