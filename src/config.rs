// =============================================================================
// Indicator Configuration — immutable parameter set passed into every call
// =============================================================================
//
// Every tunable window, span, and multiplier lives here.  The engine only ever
// borrows the config, so a single value can be shared across many series.
//
// All fields carry `#[serde(default = ...)]` so that a partial JSON file (or
// `{}`) yields the standard dashboard parameters.  Single-instance indicator
// families are `Option`s: an explicit JSON `null` switches that family off.
//
// =============================================================================

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConfigError;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_true() -> bool {
    true
}

fn default_sma_windows() -> BTreeSet<usize> {
    BTreeSet::from([20, 50])
}

fn default_ema_spans() -> BTreeSet<usize> {
    BTreeSet::from([20])
}

fn default_rsi_period() -> Option<usize> {
    Some(14)
}

fn default_macd() -> Option<MacdParams> {
    Some(MacdParams::default())
}

fn default_stochastic() -> Option<StochasticParams> {
    Some(StochasticParams::default())
}

fn default_bollinger() -> Option<BollingerParams> {
    Some(BollingerParams::default())
}

fn default_snapshot_lookback() -> usize {
    30
}

fn default_macd_fast() -> usize {
    12
}

fn default_macd_slow() -> usize {
    26
}

fn default_macd_signal() -> usize {
    9
}

fn default_stoch_period() -> usize {
    14
}

fn default_stoch_smooth_k() -> usize {
    3
}

fn default_bollinger_window() -> usize {
    20
}

fn default_bollinger_multiplier() -> f64 {
    2.0
}

fn default_rsi_overbought() -> f64 {
    70.0
}

fn default_rsi_oversold() -> f64 {
    30.0
}

fn default_stoch_overbought() -> f64 {
    80.0
}

fn default_stoch_oversold() -> f64 {
    20.0
}

// =============================================================================
// Per-family parameters
// =============================================================================

/// Spans for the MACD line and its signal line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdParams {
    #[serde(default = "default_macd_fast")]
    pub fast: usize,
    #[serde(default = "default_macd_slow")]
    pub slow: usize,
    #[serde(default = "default_macd_signal")]
    pub signal: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast: default_macd_fast(),
            slow: default_macd_slow(),
            signal: default_macd_signal(),
        }
    }
}

/// Look-back period for %K and the smoothing window for %D.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StochasticParams {
    #[serde(default = "default_stoch_period")]
    pub period: usize,
    #[serde(default = "default_stoch_smooth_k")]
    pub smooth_k: usize,
}

impl Default for StochasticParams {
    fn default() -> Self {
        Self {
            period: default_stoch_period(),
            smooth_k: default_stoch_smooth_k(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerParams {
    #[serde(default = "default_bollinger_window")]
    pub window: usize,

    /// Number of standard deviations between the middle band and each outer band.
    #[serde(default = "default_bollinger_multiplier")]
    pub std_dev_multiplier: f64,
}

impl Default for BollingerParams {
    fn default() -> Self {
        Self {
            window: default_bollinger_window(),
            std_dev_multiplier: default_bollinger_multiplier(),
        }
    }
}

/// Oscillator levels used to label the latest RSI / %K reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalThresholds {
    #[serde(default = "default_rsi_overbought")]
    pub rsi_overbought: f64,
    #[serde(default = "default_rsi_oversold")]
    pub rsi_oversold: f64,
    #[serde(default = "default_stoch_overbought")]
    pub stoch_overbought: f64,
    #[serde(default = "default_stoch_oversold")]
    pub stoch_oversold: f64,
}

impl Default for SignalThresholds {
    fn default() -> Self {
        Self {
            rsi_overbought: default_rsi_overbought(),
            rsi_oversold: default_rsi_oversold(),
            stoch_overbought: default_stoch_overbought(),
            stoch_oversold: default_stoch_oversold(),
        }
    }
}

// =============================================================================
// IndicatorConfig
// =============================================================================

/// Full parameter set for one engine invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorConfig {
    // --- Windowed averages --------------------------------------------------

    /// One `SMA_{w}` column per window.
    #[serde(default = "default_sma_windows")]
    pub sma_windows: BTreeSet<usize>,

    /// One `EMA_{s}` column per span.
    #[serde(default = "default_ema_spans")]
    pub ema_spans: BTreeSet<usize>,

    // --- Single-instance families (null disables) ---------------------------

    #[serde(default = "default_rsi_period")]
    pub rsi_period: Option<usize>,

    #[serde(default = "default_macd")]
    pub macd: Option<MacdParams>,

    #[serde(default = "default_stochastic")]
    pub stochastic: Option<StochasticParams>,

    #[serde(default = "default_bollinger")]
    pub bollinger: Option<BollingerParams>,

    /// Cumulative volume-weighted average price.
    #[serde(default = "default_true")]
    pub vwap: bool,

    // --- Interpretation -----------------------------------------------------

    #[serde(default)]
    pub thresholds: SignalThresholds,

    /// Rows considered by the market snapshot for high / low / mean volume.
    #[serde(default = "default_snapshot_lookback")]
    pub snapshot_lookback: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            sma_windows: default_sma_windows(),
            ema_spans: default_ema_spans(),
            rsi_period: default_rsi_period(),
            macd: default_macd(),
            stochastic: default_stochastic(),
            bollinger: default_bollinger(),
            vwap: true,
            thresholds: SignalThresholds::default(),
            snapshot_lookback: default_snapshot_lookback(),
        }
    }
}

impl IndicatorConfig {
    /// A config with every family switched off; callers enable what they need.
    pub fn empty() -> Self {
        Self {
            sma_windows: BTreeSet::new(),
            ema_spans: BTreeSet::new(),
            rsi_period: None,
            macd: None,
            stochastic: None,
            bollinger: None,
            vwap: false,
            ..Self::default()
        }
    }

    /// Load configuration from a JSON file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read indicator config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse indicator config from {}", path.display()))?;

        info!(
            path = %path.display(),
            sma = ?config.sma_windows,
            ema = ?config.ema_spans,
            rsi = ?config.rsi_period,
            "indicator config loaded"
        );

        Ok(config)
    }

    /// Check every requested parameter against a series of `len` bars.
    ///
    /// A window that would leave its whole column undefined is reported as
    /// [`ConfigError::InsufficientHistory`] rather than silently producing an
    /// all-`None` column.  EMA and MACD are defined from the first row, so
    /// their spans are never too long.
    pub fn validate(&self, len: usize) -> Result<(), ConfigError> {
        for &w in &self.sma_windows {
            if w == 0 {
                return Err(ConfigError::non_positive("SMA window"));
            }
            if w > len {
                return Err(ConfigError::insufficient(format!("SMA_{w}"), w, len));
            }
        }

        if self.ema_spans.contains(&0) {
            return Err(ConfigError::non_positive("EMA span"));
        }

        if let Some(p) = self.rsi_period {
            if p == 0 {
                return Err(ConfigError::non_positive("RSI period"));
            }
            // First delta exists at row 1, so the first full window ends at row p.
            if p + 1 > len {
                return Err(ConfigError::insufficient(format!("RSI_{p}"), p + 1, len));
            }
        }

        if let Some(m) = &self.macd {
            if m.fast == 0 || m.slow == 0 || m.signal == 0 {
                return Err(ConfigError::non_positive("MACD span"));
            }
        }

        if let Some(s) = &self.stochastic {
            if s.period == 0 {
                return Err(ConfigError::non_positive("stochastic period"));
            }
            if s.smooth_k == 0 {
                return Err(ConfigError::non_positive("stochastic smooth_k"));
            }
            let required = s.period + s.smooth_k - 1;
            if required > len {
                return Err(ConfigError::insufficient("STOCH_D", required, len));
            }
        }

        if let Some(b) = &self.bollinger {
            if b.window == 0 {
                return Err(ConfigError::non_positive("bollinger window"));
            }
            // Sample standard deviation needs at least two observations.
            if b.window < 2 {
                return Err(ConfigError::WindowTooShort {
                    param: "bollinger window".to_string(),
                    window: b.window,
                    min: 2,
                });
            }
            if !b.std_dev_multiplier.is_finite() || b.std_dev_multiplier <= 0.0 {
                return Err(ConfigError::InvalidMultiplier {
                    value: b.std_dev_multiplier,
                });
            }
            if b.window > len {
                return Err(ConfigError::insufficient("BB", b.window, len));
            }
        }

        if self.snapshot_lookback == 0 {
            return Err(ConfigError::non_positive("snapshot lookback"));
        }

        Ok(())
    }
}
