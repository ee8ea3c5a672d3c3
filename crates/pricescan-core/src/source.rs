//! Reading observation sequences from per-instrument CSV files.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::{InstrumentId, Observation, SourceReadError, TradeDate};

/// A discovered input file and the instrument name derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SourceId {
    path: PathBuf,
    stem: String,
}

impl SourceId {
    /// The stem is the file name up to its first `.` (`FLTR.L.csv` -> `FLTR`).
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let stem = path
            .file_name()
            .map(|name| name.to_string_lossy())
            .and_then(|name| name.split('.').next().map(str::to_owned))
            .unwrap_or_default();
        Self { path, stem }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }
}

/// Supplies the full ordered observation sequence of one source.
pub trait SourceReader {
    fn read(&self, source: &SourceId) -> Result<Vec<Observation>, SourceReadError>;
}

/// Header-less `instrument_id,dd-mm-yyyy,price` files.
///
/// Any malformed row rejects the whole source.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvSourceReader;

impl CsvSourceReader {
    pub const fn new() -> Self {
        Self
    }

    /// Parse observations from any reader; `path` is only used in errors.
    pub fn read_from<R: Read>(
        &self,
        input: R,
        path: &Path,
    ) -> Result<Vec<Observation>, SourceReadError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(input);

        let mut observations = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|source| SourceReadError::Csv {
                path: path.to_path_buf(),
                source,
            })?;
            let line = record.position().map_or(0, csv::Position::line);
            let malformed = |reason: String| SourceReadError::MalformedRow {
                path: path.to_path_buf(),
                line,
                reason,
            };

            if record.len() != 3 {
                return Err(malformed(format!(
                    "expected 3 fields (instrument, timestamp, price), found {}",
                    record.len()
                )));
            }

            let instrument_id =
                InstrumentId::parse(&record[0]).map_err(|error| malformed(error.to_string()))?;
            let timestamp =
                TradeDate::parse(&record[1]).map_err(|error| malformed(error.to_string()))?;
            let price = record[2]
                .parse::<f64>()
                .map_err(|error| malformed(format!("invalid price '{}': {error}", &record[2])))?;
            let observation = Observation::new(instrument_id, timestamp, price)
                .map_err(|error| malformed(error.to_string()))?;

            observations.push(observation);
        }

        Ok(observations)
    }
}

impl SourceReader for CsvSourceReader {
    fn read(&self, source: &SourceId) -> Result<Vec<Observation>, SourceReadError> {
        let file = File::open(source.path()).map_err(|error| SourceReadError::Io {
            path: source.path().to_path_buf(),
            source: error,
        })?;
        self.read_from(file, source.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<Vec<Observation>, SourceReadError> {
        CsvSourceReader::new().read_from(input.as_bytes(), Path::new("FLTR.csv"))
    }

    #[test]
    fn derives_stem_from_first_dot() {
        let source = SourceId::from_path("/data/LSE/FLTR.L.csv");
        assert_eq!(source.stem(), "FLTR");
        assert_eq!(source.path(), Path::new("/data/LSE/FLTR.L.csv"));
    }

    #[test]
    fn parses_rows_in_file_order() {
        let observations =
            parse("FLTR,01-09-2023,16340.00\nFLTR, 04-09-2023 ,16503.4\n").expect("parse");

        assert_eq!(observations.len(), 2);
        assert_eq!(observations[0].instrument_id.as_str(), "FLTR");
        assert_eq!(observations[0].timestamp.format_dmy(), "01-09-2023");
        assert_eq!(observations[1].price, 16503.4);
    }

    #[test]
    fn empty_input_yields_no_observations() {
        assert!(parse("").expect("parse").is_empty());
    }

    #[test]
    fn bad_price_fails_whole_source_with_line() {
        let err = parse("FLTR,01-09-2023,1.0\nFLTR,02-09-2023,abc\nFLTR,03-09-2023,2.0\n")
            .expect_err("must fail");
        assert!(matches!(err, SourceReadError::MalformedRow { line: 2, .. }));
    }

    #[test]
    fn bad_date_fails_whole_source() {
        let err = parse("FLTR,2023-09-01,1.0\n").expect_err("must fail");
        match err {
            SourceReadError::MalformedRow { line, reason, .. } => {
                assert_eq!(line, 1);
                assert!(reason.contains("dd-mm-yyyy"), "reason: {reason}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn wrong_field_count_fails() {
        let err = parse("FLTR,01-09-2023\n").expect_err("must fail");
        assert!(matches!(err, SourceReadError::MalformedRow { .. }));
    }

    #[test]
    fn non_finite_price_fails() {
        let err = parse("FLTR,01-09-2023,inf\n").expect_err("must fail");
        assert!(matches!(err, SourceReadError::MalformedRow { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let source = SourceId::from_path("/definitely/not/here.csv");
        let err = CsvSourceReader::new().read(&source).expect_err("must fail");
        assert!(matches!(err, SourceReadError::Io { .. }));
    }
}
