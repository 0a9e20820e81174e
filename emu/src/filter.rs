use serde::{Deserialize, Serialize};

use crate::model::Read;

/// Collects reads from the one whose symbol is `start` through the one whose
/// symbol is `end`, both inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeFilter {
    pub start: String,
    pub end: String,
    #[serde(skip)]
    collecting: bool,
}

impl RangeFilter {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        RangeFilter {
            start: start.into(),
            end: end.into(),
            collecting: false,
        }
    }

    pub fn is_collecting(&self) -> bool {
        self.collecting
    }

    /// Advance the latch on one symbol; returns whether it is in range.
    pub fn check(&mut self, symbol: Option<&str>) -> bool {
        if symbol == Some(self.start.as_str()) {
            self.collecting = true;
        }
        let admitted = self.collecting;
        if symbol == Some(self.end.as_str()) {
            self.collecting = false;
        }
        admitted
    }

    pub fn on_transaction(&mut self, read: &Read, mut func: impl FnMut(&Read)) {
        if self.check(read.symbol.as_deref()) {
            func(read);
        }
    }

    pub fn reset(&mut self) {
        self.collecting = false;
    }
}

/// Any number of ranges. With none registered everything passes.
#[derive(Debug, Default, Clone)]
pub struct FilterRegistry(Vec<RangeFilter>);

impl FilterRegistry {
    pub fn new(filters: Vec<RangeFilter>) -> Self {
        FilterRegistry(filters)
    }

    pub fn register(&mut self, filter: RangeFilter) {
        self.0.push(filter);
    }

    pub fn filters(&self) -> &[RangeFilter] {
        &self.0
    }

    /// Every latch sees the read, even after one has admitted it.
    pub fn admit(&mut self, read: &Read) -> bool {
        if self.0.is_empty() {
            return true;
        }
        let symbol = read.symbol.as_deref();
        self.0
            .iter_mut()
            .fold(false, |admitted, filter| filter.check(symbol) | admitted)
    }

    pub fn collecting(&self) -> bool {
        self.0.is_empty() || self.0.iter().any(RangeFilter::is_collecting)
    }

    pub fn reset(&mut self) {
        self.0.iter_mut().for_each(RangeFilter::reset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(filter: &mut RangeFilter, symbols: &[Option<&str>]) -> Vec<bool> {
        symbols.iter().map(|s| filter.check(*s)).collect()
    }

    #[test]
    fn inclusive_range() {
        let mut filter = RangeFilter::new("Begin", "Finish");
        let got = run(
            &mut filter,
            &[Some("Before"), Some("Begin"), None, Some("Mid"), Some("Finish"), Some("After")],
        );
        assert_eq!(got, [false, true, true, true, true, false]);
    }

    #[test]
    fn repeated_start_is_noop() {
        let mut filter = RangeFilter::new("Begin", "Finish");
        let got = run(&mut filter, &[Some("Begin"), Some("Begin"), Some("Finish"), None]);
        assert_eq!(got, [true, true, true, false]);
    }

    #[test]
    fn end_while_off_is_noop() {
        let mut filter = RangeFilter::new("Begin", "Finish");
        let got = run(&mut filter, &[Some("Finish"), None, Some("Begin")]);
        assert_eq!(got, [false, false, true]);
        assert!(filter.is_collecting());
        filter.reset();
        assert!(!filter.is_collecting());
    }

    #[test]
    fn same_start_and_end() {
        let mut filter = RangeFilter::new("Tick", "Tick");
        let got = run(&mut filter, &[None, Some("Tick"), None]);
        assert_eq!(got, [false, true, false]);
    }

    #[test]
    fn empty_registry_passes() {
        let registry = FilterRegistry::default();
        assert!(registry.collecting());
    }

    #[test]
    fn registry_unions_ranges() {
        use gbarch::pin::Pins;
        use gbarch::sym::Symbols;
        use gbarch::Lookups;

        let mut symbols = Symbols::default();
        for (addr, name) in [(0x0200, "A"), (0x0210, "B"), (0x0220, "C"), (0x0230, "D")] {
            symbols.insert(0x00, addr, name);
        }
        let lookups = Lookups::with_symbols(symbols);
        let read = |addr| Read::new(0, &Pins::from_bus(addr, 0x00), 0, &lookups);

        let mut registry = FilterRegistry::new(vec![RangeFilter::new("A", "B")]);
        registry.register(RangeFilter::new("B", "D"));
        assert_eq!(registry.filters().len(), 2);
        assert!(!registry.collecting());

        let got: Vec<bool> = [0x0100, 0x0200, 0x0210, 0x0220, 0x0230, 0x0240]
            .into_iter()
            .map(|addr| registry.admit(&read(addr)))
            .collect();
        assert_eq!(got, [false, true, true, true, true, false]);

        // `B` closes the first range and opens the second
        registry.admit(&read(0x0210));
        assert!(registry.collecting());
        assert!(!registry.filters()[0].is_collecting());
        registry.reset();
        assert!(!registry.collecting());
    }
}
