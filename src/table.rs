// =============================================================================
// Indicator Table — engine output
// =============================================================================
//
// Stored column-wise: the input bars plus one named, row-aligned series per
// computed indicator.  Row views are assembled on demand for consumers that
// want the dashboard's "one row per day" shape.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::IndicatorConfig;
use crate::types::Bar;

/// Canonical column names.
pub mod columns {
    pub const BB_UPPER: &str = "BB_upper";
    pub const BB_MIDDLE: &str = "BB_middle";
    pub const BB_LOWER: &str = "BB_lower";
    pub const VWAP: &str = "VWAP";
    pub const MACD: &str = "MACD";
    pub const MACD_SIGNAL: &str = "MACD_signal";
    pub const MACD_HIST: &str = "MACD_hist";
    pub const STOCH_K: &str = "STOCH_K";
    pub const STOCH_D: &str = "STOCH_D";

    pub fn sma(window: usize) -> String {
        format!("SMA_{window}")
    }

    pub fn ema(span: usize) -> String {
        format!("EMA_{span}")
    }

    pub fn rsi(period: usize) -> String {
        format!("RSI_{period}")
    }
}

/// One named indicator series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

/// A single output row: the bar's own fields plus every indicator value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorRow {
    #[serde(flatten)]
    pub bar: Bar,
    #[serde(flatten)]
    pub indicators: BTreeMap<String, Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorTable {
    bars: Vec<Bar>,
    columns: Vec<Column>,

    /// Parameters the columns were computed with.
    #[serde(skip)]
    config: IndicatorConfig,
}

impl IndicatorTable {
    pub(crate) fn new(bars: Vec<Bar>, config: IndicatorConfig) -> Self {
        Self {
            bars,
            columns: Vec::new(),
            config,
        }
    }

    /// Append a column.  Callers guarantee `values.len() == self.len()`.
    pub(crate) fn push_column(&mut self, name: impl Into<String>, values: Vec<Option<f64>>) {
        let name = name.into();
        debug_assert_eq!(values.len(), self.bars.len(), "column {name} misaligned");
        self.columns.push(Column { name, values });
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in computation order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// Value of `name` at `row`; `None` if the column, row, or value is absent.
    pub fn value(&self, row: usize, name: &str) -> Option<f64> {
        self.column(name)?.get(row).copied().flatten()
    }

    /// Value of `name` on the most recent row.
    pub fn latest(&self, name: &str) -> Option<f64> {
        self.value(self.len().checked_sub(1)?, name)
    }

    pub fn row(&self, index: usize) -> Option<IndicatorRow> {
        let bar = self.bars.get(index)?.clone();
        let indicators = self
            .columns
            .iter()
            .map(|c| (c.name.clone(), c.values[index]))
            .collect();
        Some(IndicatorRow { bar, indicators })
    }

    /// Every row, oldest first.
    pub fn to_rows(&self) -> Vec<IndicatorRow> {
        (0..self.len()).filter_map(|i| self.row(i)).collect()
    }

    /// The most recent `n` rows, oldest first.
    pub fn tail(&self, n: usize) -> Vec<IndicatorRow> {
        let start = self.len().saturating_sub(n);
        (start..self.len()).filter_map(|i| self.row(i)).collect()
    }
}
