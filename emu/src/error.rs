use color_print::ceprintln;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to read line")]
    FileRead(#[source] std::io::Error),

    #[error("Failed to create file: {0}")]
    FileCreate(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),

    #[error("Invalid YAML: {0}")]
    Yaml(String, #[source] serde_yaml::Error),

    #[error("Malformed capture at line {0}: {1}")]
    Capture(usize, String),

    #[error("Malformed raw capture at sample {0}: {1}")]
    RawCapture(u64, String),

    #[error(transparent)]
    Table(#[from] gbarch::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Print with the chain of underlying causes.
    pub fn diag(&self) {
        ceprintln!("<red,bold>error</>: {}", self);
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            ceprintln!("     <blue>--></> {}", cause);
            source = cause.source();
        }
    }
}
