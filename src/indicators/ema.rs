// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
// EMA gives more weight to recent prices, making it more responsive to new
// information than the Simple Moving Average (SMA).
//
// Formula:
//   alpha  = 2 / (span + 1)
//   EMA_0  = value_0
//   EMA_t  = alpha * value_t + (1 - alpha) * EMA_{t-1}
//
// Seeding with the first value means EMA is defined on every row, but it only
// settles after roughly `span` observations.  Early values are kept as-is.
// =============================================================================

/// Compute the EMA series for `values` with the given `span`.
///
/// The output is row-aligned with the input.  Returns an empty `Vec` when the
/// input is empty or `span` is zero.
pub fn calculate_ema(values: &[f64], span: usize) -> Vec<f64> {
    if span == 0 {
        return Vec::new();
    }

    let alpha = 2.0 / (span + 1) as f64;

    let mut result = Vec::with_capacity(values.len());
    let mut iter = values.iter();
    let Some(&first) = iter.next() else {
        return result;
    };
    result.push(first);

    let mut prev = first;
    for &value in iter {
        let ema = alpha * value + (1.0 - alpha) * prev;
        result.push(ema);
        prev = ema;
    }

    result
}
