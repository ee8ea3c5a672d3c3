//! Mean ± 2σ outlier classification over a single window.

use serde::Serialize;

use crate::{DetectionError, Observation, OutlierRecord, ThresholdSide};

/// Width of the acceptance band, in population standard deviations.
pub const SIGMA_MULTIPLIER: f64 = 2.0;

/// Aggregates of one window's prices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WindowStats {
    pub count: usize,
    pub mean: f64,
    /// Population standard deviation (divisor `count`).
    pub std_dev: f64,
    pub lower: f64,
    pub upper: f64,
}

impl WindowStats {
    /// Two-pass mean and population variance.
    pub fn from_prices<I>(prices: I) -> Result<Self, DetectionError>
    where
        I: IntoIterator<Item = f64>,
        I::IntoIter: Clone,
    {
        let prices = prices.into_iter();
        let (count, sum, min, max) = prices.clone().fold(
            (0_usize, 0.0_f64, f64::INFINITY, f64::NEG_INFINITY),
            |(n, sum, min, max), price| (n + 1, sum + price, min.min(price), max.max(price)),
        );
        if count == 0 {
            return Err(DetectionError::EmptyWindow);
        }

        // Summation rounding must not turn a flat window into a nonzero spread.
        if min == max {
            return Ok(Self {
                count,
                mean: min,
                std_dev: 0.0,
                lower: min,
                upper: min,
            });
        }

        let n = count as f64;
        let mean = sum / n;
        let sq_diff: f64 = prices.map(|price| (price - mean).powi(2)).sum();
        let std_dev = (sq_diff / n).sqrt();

        Ok(Self {
            count,
            mean,
            std_dev,
            lower: mean - SIGMA_MULTIPLIER * std_dev,
            upper: mean + SIGMA_MULTIPLIER * std_dev,
        })
    }

    /// Strictly outside `[lower, upper]`.
    pub fn is_outlier(&self, price: f64) -> bool {
        price < self.lower || price > self.upper
    }

    pub fn side(&self, price: f64) -> ThresholdSide {
        if price > self.upper {
            ThresholdSide::Above
        } else {
            ThresholdSide::Below
        }
    }
}

/// Stateless 2σ outlier detector.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutlierDetector;

impl OutlierDetector {
    pub const fn new() -> Self {
        Self
    }

    pub fn stats(&self, window: &[Observation]) -> Result<WindowStats, DetectionError> {
        WindowStats::from_prices(window.iter().map(|observation| observation.price))
    }

    /// Flag every observation outside the band, in window order.
    pub fn detect(&self, window: &[Observation]) -> Result<Vec<OutlierRecord>, DetectionError> {
        let stats = self.stats(window)?;
        self.detect_with(window, &stats)
    }

    /// Same as [`detect`](Self::detect) but reuses already computed stats.
    pub fn detect_with(
        &self,
        window: &[Observation],
        stats: &WindowStats,
    ) -> Result<Vec<OutlierRecord>, DetectionError> {
        if window.is_empty() {
            return Err(DetectionError::EmptyWindow);
        }
        // Identical prices: nothing can sit strictly outside a zero-width band.
        if stats.std_dev == 0.0 {
            return Ok(Vec::new());
        }

        window
            .iter()
            .filter(|observation| stats.is_outlier(observation.price))
            .map(|observation| annotate(observation, stats))
            .collect()
    }
}

fn annotate(observation: &Observation, stats: &WindowStats) -> Result<OutlierRecord, DetectionError> {
    if stats.mean == 0.0 {
        return Err(DetectionError::DivisionByZero {
            timestamp: observation.timestamp,
        });
    }

    let deviation = observation.price - stats.mean;
    Ok(OutlierRecord {
        instrument_id: observation.instrument_id.clone(),
        timestamp: observation.timestamp,
        price: observation.price,
        mean: stats.mean,
        deviation,
        percent_deviation: deviation / stats.mean * 100.0,
        threshold_exceeded: stats.side(observation.price),
    })
}
