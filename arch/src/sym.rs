use std::collections::HashMap;

use indexmap::IndexMap;

use crate::error::{Error, Result};

/// Debug symbols keyed by address, then bank.
///
/// Source text is the RGBDS `.sym` format: `<bank-hex>:<addr-hex> <name>`,
/// one per line, `;` starting a comment.
#[derive(Debug, Default, Clone)]
pub struct Symbols {
    by_addr: HashMap<u16, HashMap<u8, String>>,
    by_name: IndexMap<String, (u8, u16)>,
}

impl Symbols {
    /// Malformed lines are skipped with a warning, or rejected when `strict`.
    pub fn parse(text: &str, strict: bool) -> Result<Self> {
        let mut symbols = Symbols::default();
        for (idx, raw) in text.lines().enumerate() {
            match parse_line(raw) {
                Ok(Some((bank, addr, name))) => symbols.insert(bank, addr, name),
                Ok(None) => {}
                Err(reason) => {
                    let err = Error::SymbolLine(idx + 1, raw.to_string(), reason);
                    if strict {
                        return Err(err);
                    }
                    log::warn!("{}", err);
                }
            }
        }
        log::info!("Loaded {} symbols", symbols.len());
        Ok(symbols)
    }

    /// A later definition for the same bank and address wins.
    pub fn insert(&mut self, bank: u8, addr: u16, name: impl Into<String>) {
        let name = name.into();
        self.by_name.entry(name.clone()).or_insert((bank, addr));
        self.by_addr.entry(addr).or_default().insert(bank, name);
    }

    pub fn get(&self, addr: u16, bank: u8) -> Option<&str> {
        self.by_addr.get(&addr)?.get(&bank).map(String::as_str)
    }

    /// First definition of `name`.
    pub fn lookup_name(&self, name: &str) -> Option<(u8, u16)> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.by_addr.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_addr.is_empty()
    }
}

fn parse_line(raw: &str) -> std::result::Result<Option<(u8, u16, String)>, String> {
    let code = match raw.split_once(';') {
        Some((code, _comment)) => code,
        None => raw,
    };
    let mut words = code.split_whitespace();
    let Some(loc) = words.next() else {
        return Ok(None);
    };

    let (bank, addr) = match loc.split(':').collect::<Vec<_>>()[..] {
        [bank, addr] => (bank, addr),
        _ => return Err(format!("expected exactly one `:` in `{}`", loc)),
    };
    let bank = u8::from_str_radix(bank, 16).map_err(|e| format!("bank `{}`: {}", bank, e))?;
    let addr = u16::from_str_radix(addr, 16).map_err(|e| format!("address `{}`: {}", addr, e))?;
    let name = words.next().ok_or("missing symbol name")?;
    if let Some(extra) = words.next() {
        return Err(format!("unexpected `{}` after symbol name", extra));
    }

    Ok(Some((bank, addr, name.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SYM: &str = "\
; File generated by rgblink
00:0150 Start
03:5000 MyFunc
04:5000 OtherFunc ; same address, other bank
01:a000 wPlayerX

00:0153 Start.loop
";

    #[test]
    fn parse() {
        let symbols = Symbols::parse(SYM, true).unwrap();
        assert_eq!(symbols.len(), 5);
        assert_eq!(symbols.get(0x5000, 0x03), Some("MyFunc"));
        assert_eq!(symbols.get(0x5000, 0x04), Some("OtherFunc"));
        assert_eq!(symbols.get(0x5000, 0x00), None);
        assert_eq!(symbols.get(0xA000, 0x01), Some("wPlayerX"));
        assert_eq!(symbols.get(0x0153, 0x00), Some("Start.loop"));
        assert_eq!(symbols.lookup_name("MyFunc"), Some((0x03, 0x5000)));
        assert_eq!(symbols.lookup_name("Nope"), None);
    }

    #[test]
    fn lenient_skips_malformed() {
        let text = "03:5000 MyFunc\n035000 NoColon\n03:50:00 TwoColons\nzz:5000 BadBank\n03:5001\n03:5003 Two Words\n03:5002 Next\n";
        let symbols = Symbols::parse(text, false).unwrap();
        assert_eq!(symbols.len(), 2);
        assert_eq!(symbols.get(0x5000, 0x03), Some("MyFunc"));
        assert_eq!(symbols.get(0x5002, 0x03), Some("Next"));
    }

    #[test]
    fn strict_rejects_malformed() {
        let text = "03:5000 MyFunc\n035000 NoColon\n";
        match Symbols::parse(text, true) {
            Err(Error::SymbolLine(line, raw, _)) => {
                assert_eq!(line, 2);
                assert_eq!(raw, "035000 NoColon");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn trailing_words() {
        assert!(parse_line("03:5000 Foo Bar").is_err());
        assert!(Symbols::parse("03:5000 Foo Bar\n", true).is_err());

        let symbols = Symbols::parse("03:5000 Foo Bar\n", false).unwrap();
        assert_eq!(symbols.get(0x5000, 0x03), None);
        assert!(symbols.is_empty());
    }

    #[test]
    fn bank_out_of_range() {
        assert!(parse_line("100:4000 Far").is_err());
        assert_eq!(
            parse_line("ff:4000 Far"),
            Ok(Some((0xFF, 0x4000, "Far".to_string())))
        );
    }

    #[test]
    fn redefinition_replaces_only_its_entry() {
        let symbols = Symbols::parse("03:5000 Old\n03:5000 New\n03:5001 Kept\n", true).unwrap();
        assert_eq!(symbols.get(0x5000, 0x03), Some("New"));
        assert_eq!(symbols.get(0x5001, 0x03), Some("Kept"));
        assert_eq!(symbols.lookup_name("Old"), Some((0x03, 0x5000)));
    }
}
