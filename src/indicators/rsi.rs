// =============================================================================
// Relative Strength Index (RSI) — Simple Rolling Mean
// =============================================================================
//
// RSI measures the speed and magnitude of recent price changes to evaluate
// whether an asset is overbought or oversold.
//
// Step 1 — delta_t = close_t - close_{t-1}  (undefined at t = 0).
// Step 2 — gain_t = max(delta_t, 0),  loss_t = max(-delta_t, 0).
// Step 3 — avg_gain / avg_loss = simple rolling mean over `period` rows.
//          (Not Wilder's recursive smoothing.)
// Step 4 — RS  = avg_gain / avg_loss
//          RSI = 100 - 100 / (1 + RS)
//
// The first defined row is `period` (the first delta is at row 1).
// =============================================================================

use super::window::{mean, rolling_defined};

/// Compute the row-aligned RSI series for `closes` over `period` deltas.
///
/// # Edge cases
/// - `period == 0` => every row `None`
/// - average loss zero, average gain positive => 100.0
/// - average gain and loss both zero (flat window) => `None`
pub fn calculate_rsi(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let deltas: Vec<Option<f64>> = std::iter::once(None)
        .chain(closes.windows(2).map(|w| Some(w[1] - w[0])))
        .take(closes.len())
        .collect();

    let gains: Vec<Option<f64>> = deltas.iter().map(|d| d.map(|d| d.max(0.0))).collect();
    let losses: Vec<Option<f64>> = deltas.iter().map(|d| d.map(|d| (-d).max(0.0))).collect();

    let avg_gain = rolling_defined(&gains, period, mean);
    let avg_loss = rolling_defined(&losses, period, mean);

    avg_gain
        .into_iter()
        .zip(avg_loss)
        .map(|(g, l)| rsi_from_averages(g?, l?))
        .collect()
}

// =============================================================================
// Internal helpers
// =============================================================================

/// Convert average gain / average loss into an RSI value in [0, 100].
///
/// - If both averages are zero there is no movement to measure: `None`.
/// - If average loss is zero (only gains), RSI saturates at 100.0.
/// - Returns `None` when the result is non-finite.
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    if avg_loss == 0.0 && avg_gain == 0.0 {
        return None;
    }

    let rsi = if avg_loss == 0.0 {
        100.0
    } else {
        let rs = avg_gain / avg_loss;
        100.0 - 100.0 / (1.0 + rs)
    };

    rsi.is_finite().then_some(rsi)
}
