// =============================================================================
// Indicator Engine
// =============================================================================
//
// Turns a validated bar series plus an `IndicatorConfig` into an
// `IndicatorTable`.  No state survives between calls: the bars are borrowed
// read-only and the table is freshly allocated for the caller.
//
// Order of work:
//   1. Validate the series (InvalidInput) and the config against its length
//      (ConfigError).  Nothing is computed if either fails.
//   2. Compute each enabled family independently from the same closes.
//   3. Append its columns to the table under their canonical names.

use tracing::{debug, trace};

use crate::config::IndicatorConfig;
use crate::error::EngineError;
use crate::indicators::{
    calculate_bollinger, calculate_ema, calculate_macd, calculate_rsi, calculate_sma,
    calculate_stochastic, calculate_vwap,
};
use crate::table::{columns, IndicatorTable};
use crate::types::{validate_series, Bar};

fn defined(values: Vec<f64>) -> Vec<Option<f64>> {
    values.into_iter().map(Some).collect()
}

/// Compute every indicator enabled in `config` over `bars`.
///
/// # Errors
/// - [`EngineError::InvalidInput`] for an empty series, non-increasing dates,
///   or non-finite / non-positive prices.
/// - [`EngineError::Config`] for a zero window, bad multiplier, or a window
///   that would leave its entire column undefined.
pub fn compute(bars: &[Bar], config: &IndicatorConfig) -> Result<IndicatorTable, EngineError> {
    validate_series(bars)?;
    config.validate(bars.len())?;

    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let mut table = IndicatorTable::new(bars.to_vec(), config.clone());

    for &window in &config.sma_windows {
        trace!(window, "computing SMA");
        table.push_column(columns::sma(window), calculate_sma(&closes, window));
    }

    for &span in &config.ema_spans {
        trace!(span, "computing EMA");
        table.push_column(columns::ema(span), defined(calculate_ema(&closes, span)));
    }

    if let Some(bb) = &config.bollinger {
        trace!(window = bb.window, k = bb.std_dev_multiplier, "computing Bollinger Bands");
        let bands = calculate_bollinger(&closes, bb.window, bb.std_dev_multiplier);
        table.push_column(columns::BB_UPPER, bands.upper);
        table.push_column(columns::BB_MIDDLE, bands.middle);
        table.push_column(columns::BB_LOWER, bands.lower);
    }

    if config.vwap {
        trace!("computing VWAP");
        table.push_column(columns::VWAP, calculate_vwap(bars));
    }

    if let Some(period) = config.rsi_period {
        trace!(period, "computing RSI");
        table.push_column(columns::rsi(period), calculate_rsi(&closes, period));
    }

    if let Some(m) = &config.macd {
        trace!(fast = m.fast, slow = m.slow, signal = m.signal, "computing MACD");
        let macd = calculate_macd(&closes, m.fast, m.slow, m.signal);
        table.push_column(columns::MACD, defined(macd.macd));
        table.push_column(columns::MACD_SIGNAL, defined(macd.signal));
        table.push_column(columns::MACD_HIST, defined(macd.histogram));
    }

    if let Some(s) = &config.stochastic {
        trace!(period = s.period, smooth_k = s.smooth_k, "computing stochastic");
        let stoch = calculate_stochastic(bars, s.period, s.smooth_k);
        table.push_column(columns::STOCH_K, stoch.k);
        table.push_column(columns::STOCH_D, stoch.d);
    }

    debug!(
        rows = table.len(),
        columns = ?table.column_names(),
        "indicator table computed"
    );

    Ok(table)
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::config::{BollingerParams, MacdParams, StochasticParams};
    use crate::error::{ConfigError, InputError};
    use crate::types::fixtures::{day, series_from_closes};

    /// 25 bars, closes 100..=124, high == close, constant volume.
    fn uptrend() -> Vec<Bar> {
        (0..25)
            .map(|i| {
                let c = 100.0 + i as f64;
                Bar {
                    date: day(i),
                    open: c - 0.5,
                    high: c,
                    low: c - 1.0,
                    close: c,
                    volume: 1_000,
                }
            })
            .collect()
    }

    fn wave(n: usize) -> Vec<Bar> {
        (0..n)
            .map(|i| {
                let t = i as f64;
                let mid = 100.0 + (t * 0.21).sin() * 12.0 + (t * 0.05).cos() * 3.0;
                let close = mid + (t * 1.7).sin() * 1.5;
                Bar {
                    date: day(i as i64),
                    open: mid,
                    high: mid + 2.0,
                    low: mid - 2.0,
                    close,
                    volume: 1_000 + (i as u64 * 37) % 900,
                }
            })
            .collect()
    }

    fn uptrend_config() -> IndicatorConfig {
        let mut cfg = IndicatorConfig::default();
        cfg.sma_windows = BTreeSet::from([20]);
        cfg
    }

    #[test]
    fn empty_series_is_invalid_input() {
        assert_eq!(
            compute(&[], &IndicatorConfig::default()),
            Err(EngineError::InvalidInput(InputError::EmptySeries))
        );
    }

    #[test]
    fn bad_series_checked_before_config() {
        let mut bars = series_from_closes(&[10.0, 11.0]);
        bars[1].date = bars[0].date;
        // Default config is also too long for two bars; input wins.
        assert!(matches!(
            compute(&bars, &IndicatorConfig::default()),
            Err(EngineError::InvalidInput(_))
        ));
    }

    #[test]
    fn gap_bars_are_computed() {
        let mut bars = series_from_closes(&[10.0, 11.0, 12.0]);
        bars[1].open = 13.0; // opens above its own high
        let mut cfg = IndicatorConfig::empty();
        cfg.sma_windows = BTreeSet::from([2]);
        let table = compute(&bars, &cfg).unwrap();
        assert_eq!(table.value(1, "SMA_2"), Some(10.5));
    }

    #[test]
    fn equal_macd_spans_give_zero_line() {
        let mut cfg = IndicatorConfig::empty();
        cfg.macd = Some(MacdParams { fast: 12, slow: 12, signal: 9 });
        let table = compute(&wave(40), &cfg).unwrap();
        for name in [columns::MACD, columns::MACD_SIGNAL, columns::MACD_HIST] {
            assert!(table.column(name).unwrap().iter().all(|&v| v == Some(0.0)), "{name}");
        }
    }

    #[test]
    fn table_remembers_its_config() {
        let cfg = uptrend_config();
        let table = compute(&uptrend(), &cfg).unwrap();
        assert_eq!(table.config(), &cfg);
    }

    #[test]
    fn too_long_window_is_config_error() {
        let err = compute(&uptrend(), &IndicatorConfig::default()).unwrap_err();
        assert_eq!(
            err,
            EngineError::Config(ConfigError::insufficient("SMA_50", 50, 25))
        );
    }

    #[test]
    fn table_is_row_aligned_with_input() {
        let bars = wave(120);
        let table = compute(&bars, &IndicatorConfig::default()).unwrap();
        assert_eq!(table.len(), bars.len());
        assert_eq!(table.bars(), &bars[..]);
        for col in table.columns() {
            assert_eq!(col.values.len(), bars.len(), "column {}", col.name);
        }
        assert_eq!(
            table.column_names(),
            vec![
                "SMA_20", "SMA_50", "EMA_20", "BB_upper", "BB_middle", "BB_lower", "VWAP",
                "RSI_14", "MACD", "MACD_signal", "MACD_hist", "STOCH_K", "STOCH_D",
            ]
        );
    }

    #[test]
    fn families_are_independently_selectable() {
        let mut cfg = IndicatorConfig::empty();
        cfg.rsi_period = Some(5);
        let table = compute(&wave(30), &cfg).unwrap();
        assert_eq!(table.column_names(), vec!["RSI_5"]);

        let table = compute(&wave(30), &IndicatorConfig::empty()).unwrap();
        assert!(table.columns().is_empty());
        assert_eq!(table.len(), 30);
    }

    #[test]
    fn sma_warmup_and_window_mean() {
        let bars = wave(80);
        let table = compute(&bars, &IndicatorConfig::default()).unwrap();
        for w in [20usize, 50] {
            let sma = table.column(&columns::sma(w)).unwrap();
            assert_eq!(sma.iter().take_while(|v| v.is_none()).count(), w - 1);
            for i in (w - 1)..bars.len() {
                let expected =
                    bars[i + 1 - w..=i].iter().map(|b| b.close).sum::<f64>() / w as f64;
                assert!((sma[i].unwrap() - expected).abs() < 1e-10);
            }
        }
    }

    #[test]
    fn ema_and_macd_defined_from_first_row() {
        let table = compute(&wave(60), &IndicatorConfig::default()).unwrap();
        for name in ["EMA_20", "MACD", "MACD_signal", "MACD_hist"] {
            assert!(table.column(name).unwrap().iter().all(Option::is_some), "{name}");
        }
    }

    #[test]
    fn computation_is_deterministic() {
        let bars = wave(150);
        let cfg = IndicatorConfig::default();
        assert_eq!(compute(&bars, &cfg), compute(&bars, &cfg));
    }

    #[test]
    fn input_is_not_mutated() {
        let bars = wave(60);
        let before = bars.clone();
        let _ = compute(&bars, &IndicatorConfig::default()).unwrap();
        assert_eq!(bars, before);
    }

    #[test]
    fn oscillators_stay_bounded() {
        let table = compute(&wave(250), &IndicatorConfig::default()).unwrap();
        for name in ["RSI_14", "STOCH_K", "STOCH_D"] {
            for v in table.column(name).unwrap().iter().flatten() {
                assert!((0.0..=100.0).contains(v), "{name} = {v}");
            }
        }
    }

    #[test]
    fn bollinger_upper_at_or_above_lower() {
        let table = compute(&wave(250), &IndicatorConfig::default()).unwrap();
        let upper = table.column(columns::BB_UPPER).unwrap();
        let lower = table.column(columns::BB_LOWER).unwrap();
        for (u, l) in upper.iter().zip(lower) {
            if let (Some(u), Some(l)) = (u, l) {
                assert!(u >= l);
            }
        }
    }

    #[test]
    fn single_bar_vwap_equals_close() {
        let mut cfg = IndicatorConfig::empty();
        cfg.vwap = true;
        let bars = vec![Bar {
            date: day(0),
            open: 0.1,
            high: 0.1,
            low: 0.1,
            close: 0.1,
            volume: 7,
        }];
        let table = compute(&bars, &cfg).unwrap();
        assert_eq!(table.value(0, columns::VWAP), Some(0.1));
    }

    // ---- Scenario: linear uptrend ------------------------------------------

    #[test]
    fn uptrend_sma_20() {
        let table = compute(&uptrend(), &uptrend_config()).unwrap();
        let sma = table.column("SMA_20").unwrap();
        assert!(sma[..19].iter().all(Option::is_none));
        // Mean of closes 100..=119.
        assert!((sma[19].unwrap() - 109.5).abs() < 1e-10);
        assert!((sma[24].unwrap() - 114.5).abs() < 1e-10);
    }

    #[test]
    fn uptrend_rsi_above_50() {
        let table = compute(&uptrend(), &uptrend_config()).unwrap();
        let rsi = table.column("RSI_14").unwrap();
        let defined: Vec<f64> = rsi.iter().flatten().copied().collect();
        assert_eq!(defined.len(), 25 - 14);
        assert!(defined.iter().all(|&v| v > 50.0));
    }

    #[test]
    fn uptrend_percent_k_saturates() {
        let table = compute(&uptrend(), &uptrend_config()).unwrap();
        let k = table.column(columns::STOCH_K).unwrap();
        assert!(k[..13].iter().all(Option::is_none));
        assert!(k[13..].iter().all(|&v| v == Some(100.0)));
    }

    #[test]
    fn uptrend_vwap_is_mean_of_closes() {
        // Constant volume => VWAP is the running mean of closes.
        let table = compute(&uptrend(), &uptrend_config()).unwrap();
        assert!((table.value(4, columns::VWAP).unwrap() - 102.0).abs() < 1e-10);
    }

    // ---- Scenario: constant close ------------------------------------------

    #[test]
    fn constant_close_collapses_bands_and_blanks_rsi() {
        let bars = series_from_closes(&[50.0; 40]);
        let mut cfg = IndicatorConfig::default();
        cfg.sma_windows = BTreeSet::from([20]);
        cfg.bollinger = Some(BollingerParams::default());
        cfg.stochastic = Some(StochasticParams::default());
        let table = compute(&bars, &cfg).unwrap();

        for i in 19..40 {
            let sma = table.value(i, "SMA_20").unwrap();
            assert_eq!(table.value(i, columns::BB_UPPER), Some(sma));
            assert_eq!(table.value(i, columns::BB_LOWER), Some(sma));
        }
        assert!(table.column("RSI_14").unwrap().iter().all(Option::is_none));
        // Bars still have a high/low range, so %K is defined (mid-range).
        assert_eq!(table.latest(columns::STOCH_K), Some(50.0));
    }
}
