use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Malformed symbol at line {0}: {2} (`{1}`)")]
    SymbolLine(usize, String, String),
}

pub type Result<T> = std::result::Result<T, Error>;
