// =============================================================================
// Bollinger Bands
// =============================================================================
//
// Bollinger Bands consist of a middle band (SMA), an upper band (SMA + k*σ),
// and a lower band (SMA - k*σ), where σ is the sample standard deviation
// (N - 1 denominator) over the same window.
//
// All three bands are undefined until the first full window.

use super::window::{mean, rolling, sample_std};

/// Row-aligned band series.
#[derive(Debug, Clone, PartialEq)]
pub struct BollingerBands {
    pub upper: Vec<Option<f64>>,
    pub middle: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

/// Calculate Bollinger Bands for the given closing prices.
///
/// Rows where either the mean or the deviation is undefined produce `None`
/// in all three bands.  A `window` below two leaves every row undefined.
pub fn calculate_bollinger(closes: &[f64], window: usize, num_std: f64) -> BollingerBands {
    let middle = rolling(closes, window, mean);
    let std = rolling(closes, window, sample_std);

    let mut upper = Vec::with_capacity(closes.len());
    let mut lower = Vec::with_capacity(closes.len());
    let mut mid = Vec::with_capacity(closes.len());

    for (m, s) in middle.into_iter().zip(std) {
        match (m, s) {
            (Some(m), Some(s)) => {
                let offset = num_std * s;
                upper.push(Some(m + offset));
                mid.push(Some(m));
                lower.push(Some(m - offset));
            }
            _ => {
                upper.push(None);
                mid.push(None);
                lower.push(None);
            }
        }
    }

    BollingerBands {
        upper,
        middle: mid,
        lower,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bollinger_basic() {
        let closes: Vec<f64> = (1..=20).map(|x| x as f64).collect();
        let bb = calculate_bollinger(&closes, 20, 2.0);
        let (u, m, l) = (bb.upper[19].unwrap(), bb.middle[19].unwrap(), bb.lower[19].unwrap());
        assert!((m - 10.5).abs() < 1e-10);
        assert!(u > m);
        assert!(l < m);
        // Sample std of 1..=20 is sqrt(35).
        assert!((u - m - 2.0 * 35.0_f64.sqrt()).abs() < 1e-10);
    }

    #[test]
    fn bollinger_warmup_undefined() {
        let closes: Vec<f64> = (1..=25).map(|x| x as f64).collect();
        let bb = calculate_bollinger(&closes, 20, 2.0);
        assert!(bb.upper[..19].iter().all(Option::is_none));
        assert!(bb.lower[..19].iter().all(Option::is_none));
        assert!(bb.upper[19..].iter().all(Option::is_some));
    }

    #[test]
    fn bollinger_insufficient_data() {
        let bb = calculate_bollinger(&[1.0, 2.0, 3.0], 20, 2.0);
        assert_eq!(bb.upper, vec![None; 3]);
    }

    #[test]
    fn bollinger_flat_bands_collapse() {
        let closes = vec![100.0; 25];
        let bb = calculate_bollinger(&closes, 20, 2.0);
        for i in 19..25 {
            assert_eq!(bb.upper[i], Some(100.0));
            assert_eq!(bb.middle[i], Some(100.0));
            assert_eq!(bb.lower[i], Some(100.0));
        }
    }

    #[test]
    fn bollinger_upper_never_below_lower() {
        let closes: Vec<f64> = (0..120)
            .map(|i| 50.0 + (i as f64 * 0.7).sin() * 8.0 + (i as f64 * 0.05))
            .collect();
        let bb = calculate_bollinger(&closes, 20, 2.0);
        for (u, l) in bb.upper.iter().zip(&bb.lower) {
            if let (Some(u), Some(l)) = (u, l) {
                assert!(u >= l, "upper {u} < lower {l}");
            }
        }
    }
}
