//! Per-source driver: read, sample, detect, write.
//!
//! A failure on one source is recorded in the [`RunReport`] and the run moves
//! on to the next source.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    CsvResultWriter, CsvSourceReader, Observation, OutlierDetector, OutlierRecord, RandomSource,
    ResultWriter, ScanConfig, ScanError, SeededRandom, SourceId, SourceReadError, SourceReader,
    WindowSampler, WindowStats,
};

/// What happened to one source.
#[derive(Debug)]
pub enum SourceOutcome {
    /// At least one outlier was found and persisted.
    Written { destination: PathBuf, outliers: usize },
    /// The window was clean; the writer was not invoked.
    NoOutliers,
    /// The source could not be processed.
    Skipped(ScanError),
}

#[derive(Debug)]
pub struct SourceReport {
    pub source: SourceId,
    /// Start index of the sampled window, when sampling succeeded.
    pub window_start: Option<usize>,
    pub outcome: SourceOutcome,
}

/// Outcome of a whole scan, one entry per source in processing order.
#[derive(Debug)]
pub struct RunReport {
    pub run_id: Uuid,
    pub sources: Vec<SourceReport>,
}

impl RunReport {
    pub fn written(&self) -> usize {
        self.count(|outcome| matches!(outcome, SourceOutcome::Written { .. }))
    }

    pub fn clean(&self) -> usize {
        self.count(|outcome| matches!(outcome, SourceOutcome::NoOutliers))
    }

    pub fn skipped(&self) -> usize {
        self.count(|outcome| matches!(outcome, SourceOutcome::Skipped(_)))
    }

    pub fn total_outliers(&self) -> usize {
        self.sources
            .iter()
            .map(|report| match report.outcome {
                SourceOutcome::Written { outliers, .. } => outliers,
                _ => 0,
            })
            .sum()
    }

    fn count(&self, predicate: impl Fn(&SourceOutcome) -> bool) -> usize {
        self.sources
            .iter()
            .filter(|report| predicate(&report.outcome))
            .count()
    }
}

/// Composes a reader, the sampler/detector core, and a writer.
#[derive(Debug, Clone)]
pub struct Scanner<R, W> {
    reader: R,
    writer: W,
    sampler: WindowSampler,
    detector: OutlierDetector,
}

impl<R, W> Scanner<R, W>
where
    R: SourceReader,
    W: ResultWriter,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            sampler: WindowSampler::new(),
            detector: OutlierDetector::new(),
        }
    }

    /// Process `sources` sequentially, drawing every window from `rng`.
    pub fn run<'s, I, G>(&self, sources: I, rng: &mut G) -> RunReport
    where
        I: IntoIterator<Item = &'s SourceId>,
        G: RandomSource + ?Sized,
    {
        let sources = sources
            .into_iter()
            .map(|source| self.process(source, &mut *rng))
            .collect();

        RunReport {
            run_id: Uuid::new_v4(),
            sources,
        }
    }

    /// Process a single source; never fails, errors become `Skipped`.
    pub fn process<G>(&self, source: &SourceId, rng: &mut G) -> SourceReport
    where
        G: RandomSource + ?Sized,
    {
        let mut window_start = None;
        let outcome = match self.try_process(source, rng, &mut window_start) {
            Ok(Some((destination, outliers))) => {
                info!(
                    source = %source.path().display(),
                    outliers,
                    destination = %destination.display(),
                    "outliers saved"
                );
                SourceOutcome::Written {
                    destination,
                    outliers,
                }
            }
            Ok(None) => {
                info!(source = %source.path().display(), "no outliers found");
                SourceOutcome::NoOutliers
            }
            Err(error) => {
                warn!(
                    source = %source.path().display(),
                    code = error.code(),
                    %error,
                    "source skipped"
                );
                SourceOutcome::Skipped(error)
            }
        };

        SourceReport {
            source: source.clone(),
            window_start,
            outcome,
        }
    }

    fn try_process<G>(
        &self,
        source: &SourceId,
        rng: &mut G,
        window_start: &mut Option<usize>,
    ) -> Result<Option<(PathBuf, usize)>, ScanError>
    where
        G: RandomSource + ?Sized,
    {
        let observations = self.reader.read(source)?;
        let window = self.sampler.sample(&observations, rng)?;
        *window_start = Some(window.start());

        let stats = self.detector.stats(&window)?;
        debug!(
            source = %source.path().display(),
            start = window.start(),
            mean = stats.mean,
            std_dev = stats.std_dev,
            "window sampled"
        );

        let outliers = self.detector.detect_with(&window, &stats)?;
        if outliers.is_empty() {
            return Ok(None);
        }

        let destination = self.writer.write(source.stem(), &outliers)?;
        Ok(Some((destination, outliers.len())))
    }
}

/// Sample and analyse one source without persisting anything.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Inspection {
    pub source: SourceId,
    pub observations: usize,
    pub window_start: usize,
    pub window: Vec<Observation>,
    pub stats: WindowStats,
    pub outliers: Vec<OutlierRecord>,
}

pub fn inspect<R, G>(reader: &R, source: &SourceId, rng: &mut G) -> Result<Inspection, ScanError>
where
    R: SourceReader + ?Sized,
    G: RandomSource + ?Sized,
{
    let observations = reader.read(source)?;
    let window = WindowSampler::new().sample(&observations, rng)?;
    let detector = OutlierDetector::new();
    let stats = detector.stats(&window)?;
    let outliers = detector.detect_with(&window, &stats)?;

    Ok(Inspection {
        source: source.clone(),
        observations: observations.len(),
        window_start: window.start(),
        window: window.to_vec(),
        stats,
        outliers,
    })
}

/// Discover sources under `config.input_dir` and scan them with the CSV
/// reader and writer.
///
/// Only discovery failures are returned as errors.
pub fn scan_directory(config: &ScanConfig) -> Result<RunReport, SourceReadError> {
    let sources = crate::discover_sources(&config.input_dir, config.limit)?;
    debug!(
        input_dir = %config.input_dir.display(),
        found = sources.len(),
        limit = config.limit,
        "sources discovered"
    );

    let scanner = Scanner::new(
        CsvSourceReader::new(),
        CsvResultWriter::new(&config.output_dir),
    );
    let mut rng = SeededRandom::new(config.seed);
    Ok(scanner.run(&sources, &mut rng))
}
