// =============================================================================
// Moving Average Convergence Divergence (MACD)
// =============================================================================
//
//   MACD_t      = EMA_fast(close)_t - EMA_slow(close)_t
//   Signal_t    = EMA_signal(MACD)_t
//   Histogram_t = MACD_t - Signal_t
//
// Built entirely from first-value-seeded EMAs, so every row is defined.

use super::ema::calculate_ema;

/// Row-aligned MACD line, signal line, and histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

pub fn calculate_macd(closes: &[f64], fast: usize, slow: usize, signal: usize) -> MacdSeries {
    let fast_ema = calculate_ema(closes, fast);
    let slow_ema = calculate_ema(closes, slow);

    let macd: Vec<f64> = fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(f, s)| f - s)
        .collect();
    let signal = calculate_ema(&macd, signal);
    let histogram = macd.iter().zip(&signal).map(|(m, s)| m - s).collect();

    MacdSeries {
        macd,
        signal,
        histogram,
    }
}
