//! Persisting outlier records as one CSV file per instrument.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::{InstrumentId, OutlierRecord, SourceReadError, ThresholdSide, TradeDate, WriteError};

/// Output columns, in order.
pub const OUTPUT_COLUMNS: [&str; 7] = [
    "Instrument-ID",
    "Timestamp",
    "Price",
    "Mean",
    "Deviation",
    "Percent_Deviation",
    "Threshold_Exceeded",
];

/// Accepts the outliers of one instrument and persists them somewhere.
pub trait ResultWriter {
    /// Returns a human-readable destination (a file path for file writers).
    fn write(&self, instrument: &str, records: &[OutlierRecord]) -> Result<PathBuf, WriteError>;
}

/// Writes `<output_dir>/<instrument>_outliers.csv`.
#[derive(Debug, Clone)]
pub struct CsvResultWriter {
    output_dir: PathBuf,
}

impl CsvResultWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn path_for(&self, instrument: &str) -> PathBuf {
        self.output_dir.join(format!("{instrument}_outliers.csv"))
    }
}

impl ResultWriter for CsvResultWriter {
    fn write(&self, instrument: &str, records: &[OutlierRecord]) -> Result<PathBuf, WriteError> {
        let path = self.path_for(instrument);
        let io_error = |source: std::io::Error| WriteError::Io {
            path: path.clone(),
            source,
        };

        fs::create_dir_all(&self.output_dir).map_err(|source| WriteError::Io {
            path: self.output_dir.clone(),
            source,
        })?;
        let file = File::create(&path).map_err(io_error)?;
        let mut buffered = BufWriter::new(file);
        write_records(&mut buffered, records).map_err(|source| WriteError::Csv {
            path: path.clone(),
            source,
        })?;
        buffered.flush().map_err(io_error)?;

        Ok(path)
    }
}

/// Encode records with a header row into any writer.
pub fn write_records<W: Write>(output: W, records: &[OutlierRecord]) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(output);
    writer.write_record(OUTPUT_COLUMNS)?;

    for record in records {
        writer.write_record([
            record.instrument_id.to_string(),
            record.timestamp.format_dmy(),
            record.price.to_string(),
            record.mean.to_string(),
            record.deviation.to_string(),
            record.percent_deviation.to_string(),
            record.threshold_exceeded.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Read back a file produced by [`CsvResultWriter`].
pub fn read_outlier_records(path: &Path) -> Result<Vec<OutlierRecord>, SourceReadError> {
    let file = File::open(path).map_err(|source| SourceReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.map_err(|source| SourceReadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let line = row.position().map_or(0, csv::Position::line);
        let malformed = |reason: String| SourceReadError::MalformedRow {
            path: path.to_path_buf(),
            line,
            reason,
        };
        let number = |index: usize| {
            row[index]
                .parse::<f64>()
                .map_err(|error| malformed(format!("{}: {error}", OUTPUT_COLUMNS[index])))
        };

        if row.len() != OUTPUT_COLUMNS.len() {
            return Err(malformed(format!(
                "expected {} fields, found {}",
                OUTPUT_COLUMNS.len(),
                row.len()
            )));
        }

        records.push(OutlierRecord {
            instrument_id: InstrumentId::parse(&row[0])
                .map_err(|error| malformed(error.to_string()))?,
            timestamp: TradeDate::parse(&row[1]).map_err(|error| malformed(error.to_string()))?,
            price: number(2)?,
            mean: number(3)?,
            deviation: number(4)?,
            percent_deviation: number(5)?,
            threshold_exceeded: ThresholdSide::parse(&row[6])
                .ok_or_else(|| malformed(format!("unknown threshold side '{}'", &row[6])))?,
        });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn record(price: f64, side: ThresholdSide) -> OutlierRecord {
        let mean = 113.3;
        OutlierRecord {
            instrument_id: InstrumentId::parse("FLTR").expect("id"),
            timestamp: TradeDate::parse("05-01-2024").expect("date"),
            price,
            mean,
            deviation: price - mean,
            percent_deviation: (price - mean) / mean * 100.0,
            threshold_exceeded: side,
        }
    }

    #[test]
    fn writes_header_and_rows() {
        let mut buffer = Vec::new();
        write_records(&mut buffer, &[record(500.0, ThresholdSide::Above)]).expect("write");
        let text = String::from_utf8(buffer).expect("utf8");
        let mut lines = text.lines();

        assert_eq!(
            lines.next(),
            Some("Instrument-ID,Timestamp,Price,Mean,Deviation,Percent_Deviation,Threshold_Exceeded")
        );
        let row = lines.next().expect("data row");
        assert!(row.starts_with("FLTR,05-01-2024,500,113.3,"), "row: {row}");
        assert!(row.ends_with(",Above"), "row: {row}");
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn writes_into_created_output_dir() {
        let dir = tempdir().expect("tempdir");
        let writer = CsvResultWriter::new(dir.path().join("output_data"));
        let records = vec![
            record(500.0, ThresholdSide::Above),
            record(-20.25, ThresholdSide::Below),
        ];

        let path = writer.write("FLTR", &records).expect("write");
        assert_eq!(path, dir.path().join("output_data").join("FLTR_outliers.csv"));

        let reread = read_outlier_records(&path).expect("read back");
        assert_eq!(reread, records);
    }

    #[test]
    fn quotes_instrument_ids_that_need_it() {
        let dir = tempdir().expect("tempdir");
        let writer = CsvResultWriter::new(dir.path());
        let mut outlier = record(500.0, ThresholdSide::Above);
        outlier.instrument_id = InstrumentId::parse("A,B").expect("id");

        let path = writer.write("AB", &[outlier.clone()]).expect("write");
        let text = fs::read_to_string(&path).expect("read");
        assert!(text.contains("\"A,B\",05-01-2024,"), "{text}");
        assert_eq!(read_outlier_records(&path).expect("read back"), vec![outlier]);
    }

    #[test]
    fn rejects_unknown_side_when_reading() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("bad.csv");
        fs::write(
            &path,
            "Instrument-ID,Timestamp,Price,Mean,Deviation,Percent_Deviation,Threshold_Exceeded\n\
             FLTR,05-01-2024,1,2,3,4,Sideways\n",
        )
        .expect("write fixture");

        let err = read_outlier_records(&path).expect_err("must fail");
        assert!(matches!(err, SourceReadError::MalformedRow { line: 2, .. }));
    }
}
