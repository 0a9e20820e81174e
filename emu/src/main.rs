use std::fs::File;
use std::io::BufReader;

use clap::Parser;

use gbarch::sym::Symbols;
use gbarch::Lookups;
use gbtrace::ann::Ann;
use gbtrace::capture::{Frames, RawFrames};
use gbtrace::config::Config;
use gbtrace::error::{Error, Result};
use gbtrace::filter::FilterRegistry;
use gbtrace::hooks::{dump::Dump, print::Print, Hook};
use gbtrace::{logger, Session};

#[derive(Parser, Debug)]
#[clap(
    name = "Gameboy Bus Trace",
    version = "v0.1.0",
    about = "Symbolic trace of a Gameboy cartridge bus capture"
)]
struct Args {
    /// Symbol file (`bank:addr name` per line)
    #[arg(short, long)]
    sym: Option<String>,

    /// Reject the symbol file on its first malformed line
    #[arg(long)]
    strict_symbols: bool,

    /// YAML config with symbol file and filters
    #[arg(short, long)]
    config: Option<String>,

    /// Only annotate from symbol START through symbol END
    #[arg(short, long, num_args = 2, value_names = ["START", "END"])]
    range: Option<Vec<String>>,

    /// Write events as YAML
    #[arg(short, long)]
    output: Option<String>,

    /// Print only these channels (addr, rd, wr, sym, wr_func, code, const, rom_bank, sram_bank)
    #[arg(long, value_delimiter = ',')]
    only: Vec<Ann>,

    /// Input is a raw analyzer dump (one byte per channel per sample)
    #[arg(long)]
    raw: bool,

    /// -v note, -vv debug, -vvv trace
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[arg(default_value = "capture.txt")]
    input_file: String,
}

fn main() {
    let args = Args::parse();
    if let Err(err) = logger::init(args.verbose) {
        eprintln!("{}", err);
    }
    if let Err(err) = run(args) {
        err.diag();
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    // ------------------------------------------------------------------------
    // Configuration: file first, flags on top
    let config = Config::arg(args.config.as_deref())?.merge(
        args.sym.clone(),
        args.strict_symbols,
        args.range.as_deref(),
    );

    println!("Gameboy Bus Trace");
    println!("+-----------------------------------------------+");
    println!("| Decode: {:<37} |", args.input_file);
    if let Some(fname) = &config.symbols {
        println!("|  - Symbols: {:<33} |", fname);
    }
    for filter in &config.filters {
        println!("|  - Range: {:<35} |", format!("{} .. {}", filter.start, filter.end));
    }
    println!("+-----------------------------------------------+");

    // ------------------------------------------------------------------------
    // Lookup tables
    let symbols = match &config.symbols {
        Some(fname) => {
            let text = std::fs::read_to_string(fname)
                .map_err(|e| Error::FileOpen(fname.clone(), e))?;
            Symbols::parse(&text, config.strict_symbols)?
        }
        None => Symbols::default(),
    };
    for filter in &config.filters {
        for name in [&filter.start, &filter.end] {
            if symbols.lookup_name(name).is_none() {
                log::warn!("Range symbol `{}` is not in the symbol table", name);
            }
        }
    }
    let lookups = Lookups::with_symbols(symbols);

    // ------------------------------------------------------------------------
    // Hooks
    let mut hooks: Vec<Box<dyn Hook>> = vec![Box::new(Print::arg(args.only))];
    if let Some(fname) = args.output {
        hooks.push(Box::new(Dump::arg(fname)));
    }
    hooks.init();

    // ------------------------------------------------------------------------
    // Main loop
    let file = File::open(&args.input_file)
        .map_err(|e| Error::FileOpen(args.input_file.clone(), e))?;
    let mut session = Session::new(&lookups, FilterRegistry::new(config.filters));
    let reader = BufReader::new(file);
    if args.raw {
        session.decode(RawFrames::new(reader), &mut hooks)?;
    } else {
        session.decode(Frames::new(reader), &mut hooks)?;
    }
    hooks.fin()?;

    println!("=================================================");
    Ok(())
}
