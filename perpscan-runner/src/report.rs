//! Reporting and export: terminal table, JSON, and CSV.
//!
//! Persisted JSON carries a `schema_version`; newer versions are rejected on
//! load.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use perpscan_core::Candidate;

use crate::scanner::{ScanReport, SCHEMA_VERSION};

/// Format a price with precision suited to its magnitude.
pub fn format_price(price: f64) -> String {
    let abs = price.abs();
    if abs >= 1000.0 {
        format!("{price:.2}")
    } else if abs >= 1.0 {
        format!("{price:.4}")
    } else {
        format!("{price:.8}")
    }
}

/// Format a 24h notional volume as `$1.23B` / `$45.6M` / `$789K`.
pub fn format_volume(volume: f64) -> String {
    if volume >= 1e9 {
        format!("${:.2}B", volume / 1e9)
    } else if volume >= 1e6 {
        format!("${:.1}M", volume / 1e6)
    } else {
        format!("${:.0}K", volume / 1e3)
    }
}

// ─── Terminal table ─────────────────────────────────────────────────

/// Render the report as a fixed-width table for the terminal.
pub fn render_table(report: &ScanReport) -> String {
    let mut out = String::with_capacity(256 + report.candidates.len() * 160);

    let _ = writeln!(
        out,
        "perpscan {} | universe {} | filtered {} | analysed {} | skipped {}",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        report.universe_size,
        report.filtered_out,
        report.analysed,
        report.skipped.len(),
    );

    if report.candidates.is_empty() {
        out.push_str("no candidates\n");
        return out;
    }

    let _ = writeln!(
        out,
        "{:>3}  {:<10} {:>5}  {:<8} {:>16} {:>16} {:>16} {:>6}  {}",
        "#", "ASSET", "SCORE", "BIAS", "PRICE", "STOP", "TP1", "LEV", "SIGNALS"
    );
    for (i, c) in report.candidates.iter().enumerate() {
        let tp1 = c
            .plan
            .take_profits
            .first()
            .map(|tp| format_price(tp.price))
            .unwrap_or_else(|| "-".into());
        let _ = writeln!(
            out,
            "{:>3}  {:<10} {:>5}  {:<8} {:>16} {:>16} {:>16} {:>5.1}x  {}",
            i + 1,
            c.signal.symbol,
            c.signal.score,
            c.signal.bias.as_str(),
            format_price(c.signal.price),
            format_price(c.plan.stop_loss_price),
            tp1,
            c.plan.leverage_to_use,
            c.signal.labels.join(", "),
        );
    }
    out
}

// ─── JSON export ────────────────────────────────────────────────────

/// Serialize a `ScanReport` to pretty JSON.
pub fn export_json(report: &ScanReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize ScanReport to JSON")
}

/// Deserialize a `ScanReport` from JSON, rejecting newer schema versions.
pub fn import_json(json: &str) -> Result<ScanReport> {
    let report: ScanReport =
        serde_json::from_str(json).context("failed to deserialize ScanReport from JSON")?;
    if report.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            report.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(report)
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Export candidates as CSV, one row per candidate.
///
/// Columns: rank, symbol, score, bias, entry_price, stop_loss, stop_pct,
/// tp1, tp2, tp3, position_size, risk_amount, leverage, change_24h,
/// funding_rate, volume_24h, rsi, atr_pct, labels
pub fn export_candidates_csv(candidates: &[Candidate]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "rank",
        "symbol",
        "score",
        "bias",
        "entry_price",
        "stop_loss",
        "stop_pct",
        "tp1",
        "tp2",
        "tp3",
        "position_size",
        "risk_amount",
        "leverage",
        "change_24h",
        "funding_rate",
        "volume_24h",
        "rsi",
        "atr_pct",
        "labels",
    ])?;

    for (i, c) in candidates.iter().enumerate() {
        let (s, p) = (&c.signal, &c.plan);
        let tp = |n: usize| {
            p.take_profits
                .get(n)
                .map(|t| format!("{:.8}", t.price))
                .unwrap_or_default()
        };
        wtr.write_record([
            &(i + 1).to_string(),
            &s.symbol,
            &s.score.to_string(),
            s.bias.as_str(),
            &format!("{:.8}", p.entry_price),
            &format!("{:.8}", p.stop_loss_price),
            &format!("{:.4}", p.stop_distance_pct),
            &tp(0),
            &tp(1),
            &tp(2),
            &format!("{:.2}", p.position_size),
            &format!("{:.2}", p.risk_amount),
            &format!("{:.2}", p.leverage_to_use),
            &format!("{:.4}", s.change_24h),
            &format!("{:.6}", s.funding_rate),
            &format!("{:.0}", s.volume_24h),
            &format!("{:.2}", s.indicators.rsi),
            &format!("{:.4}", s.indicators.atr_pct),
            &s.labels.join("; "),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Save `report.json` and `candidates.csv` into `scan_{timestamp}/` under
/// `output_dir`. Returns the created directory.
pub fn save_report(report: &ScanReport, output_dir: &Path) -> Result<PathBuf> {
    let dirname = format!("scan_{}", report.generated_at.format("%Y%m%d_%H%M%S"));
    let run_dir = output_dir.join(dirname);
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create report dir: {}", run_dir.display()))?;

    std::fs::write(run_dir.join("report.json"), export_json(report)?)?;
    std::fs::write(
        run_dir.join("candidates.csv"),
        export_candidates_csv(&report.candidates)?,
    )?;

    Ok(run_dir)
}

/// Load a `ScanReport` from a directory written by [`save_report`].
pub fn load_report(dir: &Path) -> Result<ScanReport> {
    let path = dir.join("report.json");
    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    import_json(&json)
}
