// =============================================================================
// Stochastic Oscillator
// =============================================================================
//
//   %K_t = 100 * (close_t - LL) / (HH - LL)
//          LL = lowest low, HH = highest high over the last `period` bars
//   %D_t = SMA_smooth(%K)_t
//
// A flat window (HH == LL) has no range to compare against; %K is undefined
// there, and so is every %D window that includes it.

use super::window::{max, mean, min, rolling, rolling_defined};
use crate::types::Bar;

/// Row-aligned %K and %D lines.
#[derive(Debug, Clone, PartialEq)]
pub struct StochasticSeries {
    pub k: Vec<Option<f64>>,
    pub d: Vec<Option<f64>>,
}

pub fn calculate_stochastic(bars: &[Bar], period: usize, smooth: usize) -> StochasticSeries {
    let highs: Vec<f64> = bars.iter().map(|b| b.high).collect();
    let lows: Vec<f64> = bars.iter().map(|b| b.low).collect();

    let highest = rolling(&highs, period, max);
    let lowest = rolling(&lows, period, min);

    let k: Vec<Option<f64>> = bars
        .iter()
        .zip(highest.iter().zip(&lowest))
        .map(|(bar, (hh, ll))| percent_k(bar.close, (*hh)?, (*ll)?))
        .collect();
    let d = rolling_defined(&k, smooth, mean);

    StochasticSeries { k, d }
}

fn percent_k(close: f64, highest: f64, lowest: f64) -> Option<f64> {
    let range = highest - lowest;
    if range <= 0.0 {
        return None;
    }
    let k = 100.0 * (close - lowest) / range;
    k.is_finite().then_some(k)
}
