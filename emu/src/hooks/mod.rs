pub mod dump;
pub mod print;

use crate::ann::Event;
use crate::error::Result;

/// Receiver of decoded annotation events.
pub trait Hook {
    fn init(&mut self) {}
    fn put(&mut self, event: &Event);
    fn fin(&mut self) -> Result<()> {
        Ok(())
    }
}

impl Hook for Vec<Event> {
    fn put(&mut self, event: &Event) {
        self.push(event.clone());
    }
}

impl Hook for Vec<Box<dyn Hook>> {
    fn init(&mut self) {
        for hook in self.iter_mut() {
            hook.init();
        }
    }

    fn put(&mut self, event: &Event) {
        for hook in self.iter_mut() {
            hook.put(event);
        }
    }

    fn fin(&mut self) -> Result<()> {
        self.iter_mut().try_for_each(|hook| hook.fin())
    }
}
