use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
///
/// Usage errors never reach this type: clap exits with code 2 on its own.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Discovery(#[from] pricescan_core::SourceReadError),

    #[error(transparent)]
    Source(#[from] pricescan_core::ScanError),

    #[error("strict mode failed: {skipped} of {total} sources skipped")]
    StrictModeViolation { skipped: usize, total: usize },

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Source(_) => 3,
            Self::Serialization(_) => 4,
            Self::StrictModeViolation { .. } => 5,
            Self::Discovery(_) | Self::Io(_) => 10,
        }
    }
}
