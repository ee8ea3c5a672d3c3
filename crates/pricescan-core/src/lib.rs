//! # Pricescan Core
//!
//! Samples one random 30-observation window from each per-instrument price
//! series and flags the prices lying strictly outside `mean ± 2σ`
//! (population σ) of that window.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`domain`] | Observations, dates, outlier records |
//! | [`sampler`] | Random contiguous window selection |
//! | [`detector`] | Window statistics and 2σ classification |
//! | [`discovery`] | Listing input CSV files |
//! | [`source`] | Reading observation sequences |
//! | [`writer`] | Writing outlier CSV files |
//! | [`pipeline`] | Per-source driver and run report |
//! | [`config`] | Scan settings |
//! | [`error`] | Error types |
//!
//! ## Pipeline
//!
//! ```text
//! discover ──▶ read ──▶ sample ──▶ detect ──▶ write (only if outliers)
//!                 │         │          │          │
//!                 └─────────┴──────────┴──────────┴──▶ Skipped(reason), next source
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pricescan_core::{FixedIndex, OutlierDetector, WindowSampler};
//!
//! let window = WindowSampler::new().sample(&observations, &mut FixedIndex(0))?;
//! for outlier in OutlierDetector::new().detect(&window)? {
//!     println!("{} {} {}", outlier.timestamp, outlier.price, outlier.threshold_exceeded);
//! }
//! ```

pub mod config;
pub mod detector;
pub mod discovery;
pub mod domain;
pub mod error;
pub mod pipeline;
pub mod sampler;
pub mod source;
pub mod writer;

pub use config::{ScanConfig, DEFAULT_OUTPUT_DIR};
pub use detector::{OutlierDetector, WindowStats, SIGMA_MULTIPLIER};
pub use discovery::discover_sources;
pub use domain::{InstrumentId, Observation, OutlierRecord, ThresholdSide, TradeDate};
pub use error::{DetectionError, ScanError, SourceReadError, ValidationError, WriteError};
pub use pipeline::{
    inspect, scan_directory, Inspection, RunReport, Scanner, SourceOutcome, SourceReport,
};
pub use sampler::{FixedIndex, RandomSource, SeededRandom, Window, WindowSampler, WINDOW_LEN};
pub use source::{CsvSourceReader, SourceId, SourceReader};
pub use writer::{read_outlier_records, write_records, CsvResultWriter, ResultWriter, OUTPUT_COLUMNS};
