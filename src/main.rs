//! demand-pager - Main Entry Point
//!
//! Translates a stream of logical addresses to physical addresses through
//! a TLB and a page table, demand-paging from a backing store with LRU
//! replacement and optional dirty-bit tracking.
//!
//! Usage: demand-pager [OPTIONS] <ADDRESSES> <BACKING_STORE>

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use demand_pager::io::{process_stream, write_summary};
use demand_pager::{BackingStore, PagerConfig, ParsePolicy, Result, Translator};

/// Simulate demand-paged virtual address translation.
#[derive(Parser)]
#[command(name = "demand-pager")]
#[command(version, about, long_about = None)]
struct Cli {
    /// File containing one logical address per line, optionally tagged R/W
    addresses: PathBuf,

    /// Backing store blob holding the full virtual address space
    backing_store: PathBuf,

    /// Which simulator variant to run
    #[arg(short, long, value_enum, default_value = "replace")]
    preset: Preset,

    /// Write results to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Skip malformed records instead of ending the stream at the first one
    #[arg(long)]
    skip_bad_records: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Preset {
    /// Physical memory covers the whole virtual space; no replacement
    SameSize,
    /// 128 frames with LRU replacement
    Replace,
    /// LRU replacement plus dirty-bit tracking and write-back counting
    Dirty,
}

impl Preset {
    fn config(self) -> PagerConfig {
        match self {
            Preset::SameSize => PagerConfig::same_size(),
            Preset::Replace => PagerConfig::replacement(),
            Preset::Dirty => PagerConfig::dirty_bit(),
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = cli.preset.config();
    if cli.skip_bad_records {
        config.parse_policy = ParsePolicy::Skip;
    }

    let store = BackingStore::open(&cli.backing_store)?;
    let mut translator = Translator::new(config, store);

    let input = BufReader::new(File::open(&cli.addresses)?);

    let mut out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };

    process_stream(&mut translator, input, &mut out)?;
    write_summary(translator.stats(), config.track_dirty_bit, &mut out)?;
    out.flush()?;

    Ok(())
}
