use serde::Serialize;
use strum::Display;

use crate::pin::Pins;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Display)]
pub enum CycleKind {
    #[default]
    Unknown,
    Data,
    Opcode,
}

/// One bus sample taken at a strobe edge.
/// `None` means the bus was undriven (or the lines unassigned), not zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cycle {
    pub sample: u64,
    pub addr: Option<u16>,
    pub data: Option<u8>,
    pub kind: CycleKind,
}

impl Cycle {
    pub fn decode(sample: u64, pins: &Pins) -> Self {
        Cycle {
            sample,
            addr: pins.addr(),
            data: pins.data(),
            kind: CycleKind::Unknown,
        }
    }

    pub fn with_kind(mut self, kind: CycleKind) -> Self {
        self.kind = kind;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pin::{Level, Pin, PIN_COUNT};
    use proptest::prelude::*;

    fn level() -> impl Strategy<Value = Level> {
        prop_oneof![Just(Level::Low), Just(Level::High), Just(Level::Unassigned)]
    }

    #[test]
    fn decode_driven() {
        let cycle = Cycle::decode(42, &Pins::from_bus(0x0150, 0x3e));
        assert_eq!(cycle.sample, 42);
        assert_eq!(cycle.addr, Some(0x0150));
        assert_eq!(cycle.data, Some(0x3e));
        assert_eq!(cycle.kind, CycleKind::Unknown);
    }

    proptest! {
        #[test]
        fn unassigned_lines_never_decode_to_a_value(
            levels in proptest::array::uniform28(level())
        ) {
            let pins = Pins::new(levels);
            let cycle = Cycle::decode(0, &pins);
            let addr_unassigned = levels[Pin::ADDR].contains(&Level::Unassigned);
            let data_unassigned = levels[Pin::DATA].contains(&Level::Unassigned);
            prop_assert_eq!(cycle.addr.is_none(), addr_unassigned);
            prop_assert_eq!(cycle.data.is_none(), data_unassigned);
        }

        #[test]
        fn driven_bus_round_trips(addr in any::<u16>(), data in any::<u8>()) {
            let cycle = Cycle::decode(0, &Pins::from_bus(addr, data));
            prop_assert_eq!(cycle.addr, Some(addr));
            prop_assert_eq!(cycle.data, Some(data));
        }
    }

    #[test]
    fn width() {
        assert_eq!(Pin::ADDR.len() + Pin::DATA.len() + 4, PIN_COUNT);
    }
}
