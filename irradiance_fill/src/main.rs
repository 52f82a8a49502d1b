use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use irradiance_fill::{fill_missing, output, xlsx};

#[derive(Debug, Parser)]
#[command(version, about = "Fill missing irradiance readings with the same-slot cross-year mean")]
struct Cli {
    /// Workbook with one worksheet per month
    #[arg(long)]
    workbook: PathBuf,

    /// Worksheet to process (defaults to the first one)
    #[arg(long)]
    sheet: Option<String>,

    /// Where to write the filled table (defaults to <workbook>_<sheet>_filled.csv)
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = Cli::parse();

    let sheet = match args.sheet {
        Some(sheet) => sheet,
        None => {
            let names = xlsx::sheet_names(&args.workbook)?;
            let first = names.first().context("workbook has no sheets")?.clone();
            log::info!("no sheet given, using {first:?} (available: {names:?})");
            first
        }
    };

    let table = xlsx::load_sheet(&args.workbook, &sheet)?;
    log::info!(
        "loaded {} time slots x {} year columns from sheet {sheet:?}",
        table.n_slots(),
        table.n_years()
    );

    let (filled, report) = fill_missing(&table);
    log::info!("year columns: {:?}", report.year_columns);
    log::info!("missing readings before fill: {}", report.missing_before);
    log::info!("missing readings after fill: {}", report.missing_after);

    let out_path = args
        .output
        .unwrap_or_else(|| default_output(&args.workbook, &sheet));
    let file = File::create(&out_path)
        .with_context(|| format!("failed to create {}", out_path.display()))?;
    output::write_csv(&filled, BufWriter::new(file))?;
    log::info!("wrote filled table to {}", out_path.display());

    Ok(())
}

fn default_output(workbook: &Path, sheet: &str) -> PathBuf {
    let stem = workbook
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "irradiance".to_string());
    workbook.with_file_name(format!("{stem}_{sheet}_filled.csv"))
}
