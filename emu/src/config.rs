use std::fs::File;
use std::io::BufReader;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::filter::RangeFilter;

/// ```yaml
/// symbols: game.sym
/// strict_symbols: false
/// filters:
///   - start: UpdatePlayerCoords
///     end: _HandlePlayerStep.finish
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub symbols: Option<String>,
    pub strict_symbols: bool,
    pub filters: Vec<RangeFilter>,
}

impl Config {
    pub fn arg(file: Option<&str>) -> Result<Self> {
        match file {
            Some(fname) => Self::from_file(fname),
            None => Ok(Config::default()),
        }
    }

    pub fn from_file(path: &str) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::FileOpen(path.to_string(), e))?;
        serde_yaml::from_reader(BufReader::new(file)).map_err(|e| Error::Yaml(path.to_string(), e))
    }

    pub fn parse(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).map_err(|e| Error::Yaml("<inline>".to_string(), e))
    }

    /// Apply command line flags on top of the file: `sym` replaces the symbol
    /// file, `strict` can only turn strict mode on, `range` adds a filter.
    pub fn merge(mut self, sym: Option<String>, strict: bool, range: Option<&[String]>) -> Self {
        if sym.is_some() {
            self.symbols = sym;
        }
        self.strict_symbols |= strict;
        if let Some([start, end]) = range {
            self.filters.push(RangeFilter::new(start, end));
        }
        self
    }
}
