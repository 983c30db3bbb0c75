//! covfilter - Coverage-threshold filtering CLI
//!
//! Command-line interface for filtering mapping and variant statistics
//! tables by coverage thresholds.

use chrono::Local;
use clap::Parser;
use covfilter::error::Result;
use covfilter::pipeline::{run_filter, RunConfig, SAMPLES_FILE, STATISTICS_FILE};
use std::path::PathBuf;

/// Filter mapping and variant statistics by coverage thresholds
#[derive(Parser)]
#[command(name = "covfilter")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory containing the Analysis/Statistics folder
    directory: PathBuf,

    /// Coverage mean threshold; kept rows must exceed this value
    coverage_mean: f64,

    /// Coverage median threshold; kept rows must exceed this value
    coverage_median: f64,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = RunConfig::new(&cli.directory, cli.coverage_mean, cli.coverage_median);
    let summary = run_filter(&config)?;

    // One timestamp for both lines
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    println!(
        "<INFO>  [{}]   Filtered data has been saved in file '{}' located in {}",
        timestamp,
        STATISTICS_FILE,
        summary.table_path.display()
    );
    println!(
        "<INFO>  [{}]   SampleID and LibraryID columns have been saved in file '{}' located in {}",
        timestamp,
        SAMPLES_FILE,
        summary.samples_path.display()
    );

    Ok(())
}
