// =============================================================================
// Rolling-window helpers
// =============================================================================
//
// Every windowed indicator is built from the same primitive: apply a reducer
// to each trailing slice of length `window` and write the result at the slice's
// last row.  Rows before the first full window stay `None`.
//
// A window containing an undefined (`None`) input is itself undefined, so
// warm-up gaps propagate through chained indicators such as %D = SMA(%K).

/// Apply `reduce` to each full trailing window of `values`.
///
/// The output has the same length as `values`; the first `window - 1` rows
/// (or every row, if the input is shorter than `window`) are `None`.
pub fn rolling<F>(values: &[f64], window: usize, reduce: F) -> Vec<Option<f64>>
where
    F: Fn(&[f64]) -> Option<f64>,
{
    let mut out = vec![None; values.len()];
    if window == 0 {
        return out;
    }
    for (start, win) in values.windows(window).enumerate() {
        out[start + window - 1] = reduce(win);
    }
    out
}

/// Same as [`rolling`] over a partially-defined series.
pub fn rolling_defined<F>(values: &[Option<f64>], window: usize, reduce: F) -> Vec<Option<f64>>
where
    F: Fn(&[f64]) -> Option<f64>,
{
    let mut out = vec![None; values.len()];
    if window == 0 {
        return out;
    }
    let mut scratch = Vec::with_capacity(window);
    for (start, win) in values.windows(window).enumerate() {
        scratch.clear();
        scratch.extend(win.iter().map_while(|v| *v));
        if scratch.len() == window {
            out[start + window - 1] = reduce(&scratch);
        }
    }
    out
}

fn is_constant(win: &[f64]) -> bool {
    win.iter().all(|&v| v == win[0])
}

/// Arithmetic mean of a non-empty window.
///
/// A constant window yields its value exactly; plain summation can drift by an
/// ulp (e.g. three copies of 0.1).
pub fn mean(win: &[f64]) -> Option<f64> {
    let first = *win.first()?;
    if is_constant(win) {
        return Some(first);
    }
    let m = win.iter().sum::<f64>() / win.len() as f64;
    m.is_finite().then_some(m)
}

/// Sample standard deviation (N - 1 denominator).
///
/// `None` for windows shorter than two; exactly `0.0` for constant windows.
pub fn sample_std(win: &[f64]) -> Option<f64> {
    if win.len() < 2 {
        return None;
    }
    if is_constant(win) {
        return Some(0.0);
    }
    let m = mean(win)?;
    let ss: f64 = win.iter().map(|x| (x - m).powi(2)).sum();
    let std = (ss / (win.len() - 1) as f64).sqrt();
    std.is_finite().then_some(std)
}

pub fn min(win: &[f64]) -> Option<f64> {
    win.iter().copied().reduce(f64::min)
}

pub fn max(win: &[f64]) -> Option<f64> {
    win.iter().copied().reduce(f64::max)
}
