//! # Domain Models
//!
//! Price observations and the outlier records derived from them.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`InstrumentId`] | Validated instrument identifier |
//! | [`TradeDate`] | `dd-mm-yyyy` calendar date |
//! | [`Observation`] | One dated price for an instrument |
//! | [`OutlierRecord`] | Flagged observation with window aggregates |
//! | [`ThresholdSide`] | Whether the upper or lower band was crossed |
//!
//! Construction validates invariants; values are immutable afterwards.

mod instrument;
mod models;
mod trade_date;

pub use instrument::InstrumentId;
pub use models::{Observation, OutlierRecord, ThresholdSide};
pub use trade_date::TradeDate;
