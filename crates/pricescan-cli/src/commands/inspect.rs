use pricescan_core::{inspect, CsvSourceReader, Inspection, SeededRandom, SourceId};

use crate::cli::InspectArgs;
use crate::error::CliError;

use super::CommandResult;

pub fn run(args: &InspectArgs) -> Result<CommandResult, CliError> {
    let source = SourceId::from_path(&args.file);
    let mut rng = SeededRandom::new(args.seed);
    let inspection = inspect(&CsvSourceReader::new(), &source, &mut rng)?;

    let lines = describe(&inspection);
    let data = serde_json::to_value(&inspection)?;
    Ok(CommandResult::ok(data, lines).with_counts(1, 0))
}

fn describe(inspection: &Inspection) -> Vec<String> {
    let stats = &inspection.stats;
    let first = inspection.window.first();
    let last = inspection.window.last();

    let mut lines = vec![
        format!("source      : {}", inspection.source.path().display()),
        format!("instrument  : {}", inspection.source.stem()),
        format!("observations: {}", inspection.observations),
        format!(
            "window      : [{}, {}) {} .. {}",
            inspection.window_start,
            inspection.window_start + inspection.window.len(),
            first.map(|o| o.timestamp.to_string()).unwrap_or_default(),
            last.map(|o| o.timestamp.to_string()).unwrap_or_default(),
        ),
        format!("mean        : {}", stats.mean),
        format!("std_dev     : {}", stats.std_dev),
        format!("band        : [{}, {}]", stats.lower, stats.upper),
    ];

    if inspection.outliers.is_empty() {
        lines.push(String::from("outliers    : none"));
    } else {
        lines.push(format!("outliers    : {}", inspection.outliers.len()));
        for outlier in &inspection.outliers {
            lines.push(format!(
                "  - {} {} {} (deviation {}, {}%)",
                outlier.timestamp,
                outlier.price,
                outlier.threshold_exceeded,
                outlier.deviation,
                outlier.percent_deviation
            ));
        }
    }
    lines
}
