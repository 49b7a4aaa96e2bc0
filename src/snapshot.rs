// =============================================================================
// Market Snapshot — scalar summary of the latest indicator readings
// =============================================================================
//
// The narrative-summary collaborator never sees the table itself; it gets this
// owned, read-only digest: the latest close and indicator values, the recent
// high / low / average volume, and overbought / oversold labels for the
// bounded oscillators.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::table::{columns, IndicatorTable};
use crate::types::Zone;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketSnapshot {
    pub date: NaiveDate,
    pub close: f64,

    /// Latest value of every computed column (`None` if undefined on the last row).
    pub latest: BTreeMap<String, Option<f64>>,

    /// Number of trailing rows the range statistics cover.
    pub lookback: usize,
    pub period_high: f64,
    pub period_low: f64,
    pub average_volume: f64,

    pub rsi_zone: Option<Zone>,
    pub stochastic_zone: Option<Zone>,
}

impl MarketSnapshot {
    /// Summarise the last `snapshot_lookback` rows of `table`, using the
    /// thresholds and RSI period the table was computed with.
    ///
    /// Returns `None` only for an empty table.
    pub fn from_table(table: &IndicatorTable) -> Option<Self> {
        let config = table.config();
        let bars = table.bars();
        let last = bars.last()?;

        let lookback = config.snapshot_lookback.clamp(1, bars.len());
        let recent = &bars[bars.len() - lookback..];

        let period_high = recent.iter().map(|b| b.high).fold(f64::MIN, f64::max);
        let period_low = recent.iter().map(|b| b.low).fold(f64::MAX, f64::min);
        let average_volume =
            recent.iter().map(|b| b.volume as f64).sum::<f64>() / lookback as f64;

        let latest = table
            .columns()
            .iter()
            .map(|c| (c.name.clone(), c.values.last().copied().flatten()))
            .collect();

        let t = &config.thresholds;
        let rsi_zone = config
            .rsi_period
            .and_then(|p| table.latest(&columns::rsi(p)))
            .map(|v| Zone::classify(v, t.rsi_overbought, t.rsi_oversold));
        let stochastic_zone = table
            .latest(columns::STOCH_K)
            .map(|v| Zone::classify(v, t.stoch_overbought, t.stoch_oversold));

        Some(Self {
            date: last.date,
            close: last.close,
            latest,
            lookback,
            period_high,
            period_low,
            average_volume,
            rsi_zone,
            stochastic_zone,
        })
    }
}
