// Shared fixtures for pricescan integration tests
use std::fs;
use std::path::{Path, PathBuf};

pub use pricescan_core::{
    FixedIndex, InstrumentId, Observation, OutlierDetector, SeededRandom, ThresholdSide,
    TradeDate, WindowSampler, WINDOW_LEN,
};

/// Consecutive daily observations starting on 02-01-2023.
pub fn series(instrument: &str, prices: &[f64]) -> Vec<Observation> {
    let id = InstrumentId::parse(instrument).expect("valid instrument id");
    let first = TradeDate::parse("02-01-2023").expect("valid date").into_inner();
    prices
        .iter()
        .enumerate()
        .map(|(i, price)| {
            let day = TradeDate::from_date(first + time::Duration::days(i as i64));
            Observation::new(id.clone(), day, *price).expect("valid observation")
        })
        .collect()
}

/// Render prices as a header-less `instrument,dd-mm-yyyy,price` file body.
pub fn csv_body(instrument: &str, prices: &[f64]) -> String {
    series(instrument, prices)
        .iter()
        .map(|o| format!("{},{},{}\n", o.instrument_id, o.timestamp, o.price))
        .collect()
}

pub fn write_source(dir: &Path, file_name: &str, instrument: &str, prices: &[f64]) -> PathBuf {
    let path = dir.join(file_name);
    fs::write(&path, csv_body(instrument, prices)).expect("write fixture");
    path
}

/// 30 prices clustered around 100 with a single 500 at `spike_at`.
pub fn clustered_with_spike(spike_at: usize) -> Vec<f64> {
    let base = [100.0, 101.0, 99.0, 100.0, 102.0, 98.0, 100.0, 101.0, 99.0, 100.0];
    let mut prices: Vec<f64> = base.iter().copied().cycle().take(WINDOW_LEN).collect();
    prices[spike_at] = 500.0;
    prices
}
