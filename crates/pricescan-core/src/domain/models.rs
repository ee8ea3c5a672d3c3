use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{InstrumentId, TradeDate, ValidationError};

/// One price point of an instrument on a given date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub instrument_id: InstrumentId,
    pub timestamp: TradeDate,
    pub price: f64,
}

impl Observation {
    pub fn new(
        instrument_id: InstrumentId,
        timestamp: TradeDate,
        price: f64,
    ) -> Result<Self, ValidationError> {
        validate_finite_price(price)?;

        Ok(Self {
            instrument_id,
            timestamp,
            price,
        })
    }
}

/// Which side of the sigma band an outlier fell on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThresholdSide {
    Above,
    Below,
}

impl ThresholdSide {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Above => "Above",
            Self::Below => "Below",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "Above" => Some(Self::Above),
            "Below" => Some(Self::Below),
            _ => None,
        }
    }
}

impl Display for ThresholdSide {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An observation flagged as an outlier, annotated with its window aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierRecord {
    pub instrument_id: InstrumentId,
    pub timestamp: TradeDate,
    pub price: f64,
    pub mean: f64,
    pub deviation: f64,
    pub percent_deviation: f64,
    pub threshold_exceeded: ThresholdSide,
}

fn validate_finite_price(price: f64) -> Result<(), ValidationError> {
    if !price.is_finite() {
        return Err(ValidationError::NonFinitePrice {
            value: price.to_string(),
        });
    }
    Ok(())
}
