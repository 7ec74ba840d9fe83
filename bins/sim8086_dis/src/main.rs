mod config;
mod error;
mod listing;

use clap::Parser;
use config::Config;
use error::Error;
use listing::{write_bit_dump, write_listing, ListingOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, Level};

/// Disassemble a raw 8086 binary.
#[derive(Debug, Parser)]
#[command(name = "sim8086-dis", version)]
struct Opt {
    /// The binary file to disassemble
    binary: PathBuf,

    /// Write the listing to this file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Write the bit pattern of every input byte to this file
    #[arg(long, value_name = "PATH")]
    dump_bits: Option<PathBuf>,

    /// Prefix each instruction with its offset and raw bytes
    #[arg(long)]
    listing: bool,

    /// Print jump targets as absolute offsets
    #[arg(long)]
    resolve_targets: bool,

    /// Configuration file (default: <config dir>/sim8086/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// More logging; repeat for more detail
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_data(path: &Path, max_input_size: usize) -> Result<Vec<u8>, Error> {
    let data = std::fs::read(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;

    if data.len() > max_input_size {
        return Err(Error::InputTooLarge {
            size: data.len(),
            max: max_input_size,
        });
    }

    info!("read {} bytes from {}", data.len(), path.display());

    Ok(data)
}

fn disassemble(opt: &Opt) -> Result<(), Error> {
    let config = Config::load(opt.config.as_deref())?;
    let data = load_data(&opt.binary, config.max_input_size)?;

    if let Some(path) = &opt.dump_bits {
        let mut file = std::fs::File::create(path)?;
        write_bit_dump(&mut file, &data)?;
    }

    let options = ListingOptions {
        header: config.header,
        listing: opt.listing || config.listing,
        resolve_targets: opt.resolve_targets || config.resolve_targets,
    };

    let mut out: Box<dyn Write> = match &opt.output {
        Some(path) => Box::new(std::io::BufWriter::new(std::fs::File::create(path)?)),
        None => Box::new(std::io::stdout().lock()),
    };

    let result = write_listing(&mut out, &data, &options);
    out.flush()?;

    result
}

fn main() {
    let opt = Opt::parse();

    setup_logging(opt.verbose);

    if let Err(err) = disassemble(&opt) {
        eprintln!("sim8086-dis: {}", err);
        std::process::exit(1);
    }
}
