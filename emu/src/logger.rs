use color_print::ceprintln;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Prints `log` records in the same style as error diagnostics.
struct Logger {
    level: LevelFilter,
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        match record.level() {
            Level::Error => ceprintln!("<red,bold>error</>: {}", record.args()),
            Level::Warn => ceprintln!("<yellow,bold>warn</>: {}", record.args()),
            Level::Info => ceprintln!("<green,bold>note</>: {}", record.args()),
            Level::Debug => ceprintln!("<blue>debug</>: {}", record.args()),
            Level::Trace => ceprintln!("<dim>trace: {}</>", record.args()),
        }
    }

    fn flush(&self) {}
}

pub fn level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

pub fn init(verbose: u8) -> Result<(), SetLoggerError> {
    let level = level(verbose);
    log::set_boxed_logger(Box::new(Logger { level }))?;
    log::set_max_level(level);
    Ok(())
}

#[test]
fn verbosity() {
    assert_eq!(level(0), LevelFilter::Warn);
    assert_eq!(level(2), LevelFilter::Debug);
    assert_eq!(level(9), LevelFilter::Trace);
}
