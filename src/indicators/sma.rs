// =============================================================================
// Simple Moving Average (SMA)
// =============================================================================
//
//   SMA_t = mean(close_{t-w+1} .. close_t)
//
// Undefined for the first `w - 1` rows.

use super::window::{mean, rolling};

/// Row-aligned SMA of `closes` over `window` bars.
pub fn calculate_sma(closes: &[f64], window: usize) -> Vec<Option<f64>> {
    rolling(closes, window, mean)
}
