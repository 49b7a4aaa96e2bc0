// =============================================================================
// Volume-Weighted Average Price (VWAP)
// =============================================================================
//
// Cumulative from the first bar, not a rolling window:
//   VWAP_t = Σ(close_i * volume_i) / Σ(volume_i),  i = 0..=t
//
// Evaluated as a running weighted mean,
//   VWAP_t = VWAP_{t-1} + (close_t - VWAP_{t-1}) * volume_t / Σvolume
// which is algebraically identical and keeps a single bar's VWAP equal to its
// close exactly.  Rows where cumulative volume is still zero are undefined.

use crate::types::Bar;

/// Row-aligned cumulative VWAP of `bars`.
pub fn calculate_vwap(bars: &[Bar]) -> Vec<Option<f64>> {
    let mut result = Vec::with_capacity(bars.len());
    let mut cum_volume: u64 = 0;
    let mut vwap: Option<f64> = None;

    for bar in bars {
        cum_volume = cum_volume.saturating_add(bar.volume);
        if cum_volume > 0 {
            let weight = bar.volume as f64 / cum_volume as f64;
            vwap = Some(match vwap {
                Some(prev) => prev + (bar.close - prev) * weight,
                None => bar.close * weight,
            });
        }
        result.push(vwap.filter(|v| v.is_finite()));
    }

    result
}
