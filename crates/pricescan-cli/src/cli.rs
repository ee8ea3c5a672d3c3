//! CLI argument definitions for pricescan.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `scan` | Sample and scan the first N CSV files of a directory |
//! | `inspect` | Sample one file and print its window statistics |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `table` | Output format (table, json) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--strict` | `false` | Fail (exit 5) if any source was skipped |
//! | `--verbose` | `false` | Debug-level logs on stderr |
//!
//! # Examples
//!
//! ```bash
//! pricescan scan ./stock_price_data_files/LSE 2
//! pricescan scan ./data/NYSE 10 --output-dir out --seed 42 --format json --pretty
//! pricescan inspect ./data/LSE/FLTR.csv --seed 7
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use pricescan_core::DEFAULT_OUTPUT_DIR;

/// Pricescan - sampled 2-sigma outlier scan over instrument price files
#[derive(Debug, Parser)]
#[command(
    name = "pricescan",
    author,
    version,
    about = "Flag 2-sigma price outliers in a random 30-point window per instrument file",
    long_about = "pricescan reads per-instrument CSV files (instrument,dd-mm-yyyy,price), \
picks one random run of 30 consecutive observations from each, and reports every price \
strictly outside mean ± 2 standard deviations of that run.\n\
\n\
Use 'pricescan <command> --help' for command-specific help."
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat skipped sources as a failure (exit code 5).
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    /// Emit debug logs (overridden by RUST_LOG).
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines.
    Table,
    /// Single JSON object.
    Json,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scan the first NUM_FILES `.csv` files of a directory.
    ///
    /// Each file with at least one outlier produces
    /// `<output-dir>/<instrument>_outliers.csv`.
    ///
    /// # Examples
    ///
    ///   pricescan scan ./data/LSE 2
    ///   pricescan scan ./data/NASDAQ 5 --output-dir results --seed 1
    Scan(ScanArgs),

    /// Sample a single file and print the window statistics and outliers.
    ///
    /// Nothing is written to disk.
    Inspect(InspectArgs),
}

/// Arguments for the `scan` command.
#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Directory holding one CSV file per instrument.
    pub input_dir: PathBuf,

    /// Number of files to process.
    pub num_files: usize,

    /// Directory for `<instrument>_outliers.csv` files.
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Seed for reproducible window selection.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Arguments for the `inspect` command.
#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Instrument CSV file.
    pub file: PathBuf,

    /// Seed for reproducible window selection.
    #[arg(long)]
    pub seed: Option<u64>,
}
