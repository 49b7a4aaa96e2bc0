// =============================================================================
// ta-engine — batch technical-indicator computation over daily OHLCV bars
// =============================================================================
//
// Entry point is [`compute`]: hand it an ordered slice of bars and an
// [`IndicatorConfig`], get back an [`IndicatorTable`] with one named,
// row-aligned series per requested indicator.

pub mod config;
pub mod engine;
pub mod error;
pub mod indicators;
pub mod snapshot;
pub mod table;
pub mod types;

pub use config::{BollingerParams, IndicatorConfig, MacdParams, SignalThresholds, StochasticParams};
pub use engine::compute;
pub use error::{ConfigError, EngineError, InputError};
pub use snapshot::MarketSnapshot;
pub use table::{columns, Column, IndicatorRow, IndicatorTable};
pub use types::{validate_series, Bar, Zone};
