mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Cli;
use crate::error::CliError;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode, CliError> {
    let result = commands::run(cli)?;
    output::render(&result, cli.format, cli.pretty)?;

    if cli.strict && result.skipped > 0 {
        return Err(CliError::StrictModeViolation {
            skipped: result.skipped,
            total: result.total,
        });
    }

    if result.skipped > 0 {
        return Ok(ExitCode::from(3));
    }

    Ok(ExitCode::SUCCESS)
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "pricescan=debug,pricescan_core=debug"
    } else {
        "pricescan=info,pricescan_core=info"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
