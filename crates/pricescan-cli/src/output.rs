use std::io::{self, Write};

use crate::cli::OutputFormat;
use crate::commands::CommandResult;
use crate::error::CliError;

pub fn render(result: &CommandResult, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    for warning in &result.warnings {
        eprintln!("warning: {warning}");
    }

    let stdout = io::stdout();
    write_result(&mut stdout.lock(), result, format, pretty)
}

fn write_result<W: Write>(
    out: &mut W,
    result: &CommandResult,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            if pretty {
                serde_json::to_writer_pretty(&mut *out, &result.data)?;
            } else {
                serde_json::to_writer(&mut *out, &result.data)?;
            }
            writeln!(out)?;
        }
        OutputFormat::Table => {
            for line in &result.lines {
                writeln!(out, "{line}")?;
            }
        }
    }

    out.flush()?;
    Ok(())
}
