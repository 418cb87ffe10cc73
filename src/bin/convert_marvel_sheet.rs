//! Convert a Marvel character export (XLSX/XLS/ODS or CSV) into `marvel-raw.json` for the generator.
//! Usage: cargo run --bin convert_marvel_sheet -- path/to/characters.xlsx [--out data/sources/marvel-raw.json]

use std::fs::File;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;

use herorank::config::DEFAULT_MARVEL_RAW_PATH;
use herorank::data::sources::{read_marvel_csv, read_marvel_sheet, write_marvel_raw};

#[derive(Debug, Parser)]
#[command(name = "convert_marvel_sheet", about = "Convert a Marvel spreadsheet into marvel-raw.json")]
struct Args {
    /// Spreadsheet or CSV file.
    input: PathBuf,
    #[arg(long, default_value = DEFAULT_MARVEL_RAW_PATH)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    herorank::logging::init();
    let args = Args::parse();
    if !args.input.exists() {
        bail!("File not found: {}", args.input.display());
    }

    let is_csv = args
        .input
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    let loaded = if is_csv {
        let file = File::open(&args.input).with_context(|| format!("opening {}", args.input.display()))?;
        read_marvel_csv(file)
    } else {
        read_marvel_sheet(&args.input)
    }
    .with_context(|| format!("reading {}", args.input.display()))?;

    write_marvel_raw(&args.out, &loaded.records)
        .with_context(|| format!("writing {}", args.out.display()))?;

    let without_stats = loaded.records.iter().filter(|r| r.stats.is_none()).count();
    println!(
        "Converted {} characters ({} skipped, {} without stats) -> {}",
        loaded.records.len(),
        loaded.skipped,
        without_stats,
        args.out.display()
    );
    Ok(())
}
