// =============================================================================
// Shared types used across the indicator engine
// =============================================================================

use chrono::NaiveDate;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{InputError, PriceField};

/// A single daily OHLCV bar as supplied by the market-data collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default, deserialize_with = "deserialize_volume")]
    pub volume: u64,
}

/// Accept volume as a JSON integer or as a whole-number float (`1000.0`), the
/// shape many market-data feeds emit.
fn deserialize_volume<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawVolume {
        Whole(u64),
        Float(f64),
    }

    match RawVolume::deserialize(deserializer)? {
        RawVolume::Whole(v) => Ok(v),
        RawVolume::Float(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64 => {
            Ok(v as u64)
        }
        RawVolume::Float(v) => Err(D::Error::custom(format!(
            "volume must be a non-negative whole number, got {v}"
        ))),
    }
}

impl Bar {
    fn prices(&self) -> [(PriceField, f64); 4] {
        [
            (PriceField::Open, self.open),
            (PriceField::High, self.high),
            (PriceField::Low, self.low),
            (PriceField::Close, self.close),
        ]
    }
}

/// Check that `bars` forms a usable series: non-empty, strictly increasing
/// dates, and finite positive prices.
///
/// Bars are not checked for open/close lying inside low..high; gap bars from
/// real feeds are accepted as-is.  The first offending row is reported;
/// nothing is repaired.
pub fn validate_series(bars: &[Bar]) -> Result<(), InputError> {
    if bars.is_empty() {
        return Err(InputError::EmptySeries);
    }

    for (index, bar) in bars.iter().enumerate() {
        for (field, value) in bar.prices() {
            if !value.is_finite() {
                return Err(InputError::NonFinitePrice { index, field });
            }
            if value <= 0.0 {
                return Err(InputError::NonPositivePrice {
                    index,
                    field,
                    value,
                });
            }
        }

        if index > 0 {
            let previous = bars[index - 1].date;
            if bar.date <= previous {
                return Err(InputError::NonIncreasingTimestamp {
                    index,
                    previous,
                    current: bar.date,
                });
            }
        }
    }

    Ok(())
}

/// Overbought / oversold classification for a bounded oscillator reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Zone {
    Overbought,
    Oversold,
    Neutral,
}

impl Default for Zone {
    fn default() -> Self {
        Self::Neutral
    }
}

impl Zone {
    /// Classify `value` against inclusive `overbought` / `oversold` bounds.
    pub fn classify(value: f64, overbought: f64, oversold: f64) -> Self {
        if value >= overbought {
            Self::Overbought
        } else if value <= oversold {
            Self::Oversold
        } else {
            Self::Neutral
        }
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overbought => write!(f, "OVERBOUGHT"),
            Self::Oversold => write!(f, "OVERSOLD"),
            Self::Neutral => write!(f, "NEUTRAL"),
        }
    }
}
