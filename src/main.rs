// =============================================================================
// ta-engine — command-line driver
// =============================================================================
//
// Usage: ta-engine <bars.json> [config.json]
//
// bars.json is an array of {"date": "YYYY-MM-DD", "open", "high", "low",
// "close", "volume"} objects; volume may be an integer or a whole-number
// float.  Reads the bars, computes the configured indicators, and
// prints the resulting table (or only the market snapshot when
// TA_SNAPSHOT_ONLY=1) as pretty JSON on stdout.
// =============================================================================

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ta_engine::{compute, Bar, IndicatorConfig, MarketSnapshot};

const DEFAULT_CONFIG_PATH: &str = "indicators.json";

fn main() -> Result<()> {
    // ── 1. Environment & logging ─────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let Some(bars_path) = args.next().map(PathBuf::from) else {
        bail!(
            "usage: ta-engine <bars.json> [config.json]\n  \
             bars.json: [{{\"date\": \"YYYY-MM-DD\", \"open\": .., \"high\": .., \
             \"low\": .., \"close\": .., \"volume\": ..}}, ...]"
        );
    };
    let config_path = args
        .next()
        .or_else(|| std::env::var("TA_CONFIG").ok())
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    // ── 2. Config ────────────────────────────────────────────────────────
    let config = IndicatorConfig::load(&config_path).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load indicator config, using defaults");
        IndicatorConfig::default()
    });

    // ── 3. Bars ──────────────────────────────────────────────────────────
    let content = std::fs::read_to_string(&bars_path)
        .with_context(|| format!("failed to read bars from {}", bars_path.display()))?;
    let bars: Vec<Bar> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse bars from {}", bars_path.display()))?;

    info!(path = %bars_path.display(), rows = bars.len(), "bars loaded");

    // ── 4. Compute & emit ────────────────────────────────────────────────
    let table = compute(&bars, &config).context("indicator computation failed")?;

    let snapshot_only = std::env::var("TA_SNAPSHOT_ONLY").is_ok_and(|v| v == "1");
    let output = if snapshot_only {
        let snapshot = MarketSnapshot::from_table(&table)
            .context("cannot summarise an empty table")?;
        info!(
            date = %snapshot.date,
            close = snapshot.close,
            rsi_zone = ?snapshot.rsi_zone,
            "snapshot ready"
        );
        serde_json::to_string_pretty(&snapshot)?
    } else {
        serde_json::to_string_pretty(&table.to_rows())?
    };

    println!("{output}");
    Ok(())
}
