use serde::Serialize;
use tracing::debug;

use pricescan_core::{scan_directory, RunReport, ScanConfig, SourceOutcome, SourceReport};

use crate::cli::ScanArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct ScanResponseData {
    run_id: String,
    input_dir: String,
    output_dir: String,
    sources: Vec<SourceView>,
    summary: SummaryView,
}

#[derive(Debug, Serialize)]
struct SourceView {
    source: String,
    instrument: String,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    window_start: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    destination: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    outliers: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorView>,
}

#[derive(Debug, Serialize)]
struct ErrorView {
    code: &'static str,
    message: String,
}

#[derive(Debug, Serialize)]
struct SummaryView {
    processed: usize,
    written: usize,
    no_outliers: usize,
    skipped: usize,
    outliers: usize,
}

pub fn run(args: &ScanArgs) -> Result<CommandResult, CliError> {
    let config = ScanConfig::new(&args.input_dir, args.num_files)
        .with_output_dir(&args.output_dir)
        .with_seed(args.seed);
    debug!(
        input_dir = %config.input_dir.display(),
        limit = config.limit,
        output_dir = %config.output_dir.display(),
        seed = ?config.seed,
        "starting scan"
    );

    let report = scan_directory(&config)?;
    let lines = describe(&config, &report);
    let data = serde_json::to_value(ScanResponseData {
        run_id: report.run_id.to_string(),
        input_dir: config.input_dir.display().to_string(),
        output_dir: config.output_dir.display().to_string(),
        sources: report.sources.iter().map(source_view).collect(),
        summary: SummaryView {
            processed: report.sources.len(),
            written: report.written(),
            no_outliers: report.clean(),
            skipped: report.skipped(),
            outliers: report.total_outliers(),
        },
    })?;

    let mut result =
        CommandResult::ok(data, lines).with_counts(report.sources.len(), report.skipped());
    if report.sources.is_empty() {
        result = result.with_warning(format!(
            "No files to process in {}",
            config.input_dir.display()
        ));
    }
    Ok(result)
}

fn source_view(report: &SourceReport) -> SourceView {
    let mut view = SourceView {
        source: report.source.path().display().to_string(),
        instrument: report.source.stem().to_owned(),
        status: "",
        window_start: report.window_start,
        destination: None,
        outliers: None,
        error: None,
    };

    match &report.outcome {
        SourceOutcome::Written {
            destination,
            outliers,
        } => {
            view.status = "written";
            view.destination = Some(destination.display().to_string());
            view.outliers = Some(*outliers);
        }
        SourceOutcome::NoOutliers => {
            view.status = "no_outliers";
            view.outliers = Some(0);
        }
        SourceOutcome::Skipped(error) => {
            view.status = "skipped";
            view.error = Some(ErrorView {
                code: error.code(),
                message: error.to_string(),
            });
        }
    }

    view
}

fn describe(config: &ScanConfig, report: &RunReport) -> Vec<String> {
    let mut lines: Vec<String> = report
        .sources
        .iter()
        .map(|source| {
            let name = source.source.path().display();
            match &source.outcome {
                SourceOutcome::Written {
                    destination,
                    outliers,
                } => format!(
                    "{name}: {outliers} outlier(s) saved to {}",
                    destination.display()
                ),
                SourceOutcome::NoOutliers => format!("{name}: no outliers found"),
                SourceOutcome::Skipped(error) => format!("{name}: skipped ({error})"),
            }
        })
        .collect();

    if !report.sources.is_empty() {
        lines.push(format!(
            "processed {} file(s) from {}: {} written, {} without outliers, {} skipped",
            report.sources.len(),
            config.input_dir.display(),
            report.written(),
            report.clean(),
            report.skipped()
        ));
    }
    lines
}
