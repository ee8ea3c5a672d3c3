mod inspect;
mod scan;

use serde_json::Value;

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// Rendered result of one command.
pub struct CommandResult {
    /// Machine-readable payload for `--format json`.
    pub data: Value,
    /// Human-readable lines for `--format table`.
    pub lines: Vec<String>,
    pub warnings: Vec<String>,
    pub total: usize,
    pub skipped: usize,
}

impl CommandResult {
    pub fn ok(data: Value, lines: Vec<String>) -> Self {
        Self {
            data,
            lines,
            warnings: Vec::new(),
            total: 0,
            skipped: 0,
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn with_counts(mut self, total: usize, skipped: usize) -> Self {
        self.total = total;
        self.skipped = skipped;
        self
    }
}

pub fn run(cli: &Cli) -> Result<CommandResult, CliError> {
    match &cli.command {
        Command::Scan(args) => scan::run(args),
        Command::Inspect(args) => inspect::run(args),
    }
}
