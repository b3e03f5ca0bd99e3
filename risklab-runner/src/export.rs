//! Report artifacts — JSON and CSV export for external consumers.
//!
//! The engine owns no persistence format; these writers exist for the
//! reporting and dashboard collaborators that want files on disk.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;

use risklab_core::domain::Trade;

use crate::report::{BacktestReport, EquityPoint};

/// Write the full report as pretty-printed JSON.
pub fn write_report_json(path: &Path, report: &BacktestReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write report JSON {}", path.display()))?;
    Ok(())
}

/// Write the equity curve as `timestamp,value` CSV.
pub fn write_equity_csv(path: &Path, equity: &[EquityPoint]) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("Failed to create equity CSV {}", path.display()))?;
    writeln!(file, "timestamp,value")?;
    for point in equity {
        writeln!(file, "{},{:.4}", point.timestamp.to_rfc3339(), point.value)?;
    }
    Ok(())
}

/// Write the trade history as CSV, one row per trade (open trades included,
/// with empty exit columns).
pub fn write_trades_csv(path: &Path, trades: &[Trade]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create trades CSV {}", path.display()))?;
    writer.write_record([
        "trade_id",
        "symbol",
        "side",
        "size",
        "entry_price",
        "opened_at",
        "exit_price",
        "closed_at",
        "pnl",
        "pnl_pct",
        "strategy",
        "confidence",
    ])?;
    for trade in trades {
        writer.write_record([
            trade.id.to_string(),
            trade.symbol.clone(),
            trade.side.to_string(),
            format!("{}", trade.size),
            format!("{}", trade.entry_price),
            trade.opened_at.to_rfc3339(),
            trade.exit_price.map(|p| p.to_string()).unwrap_or_default(),
            trade
                .closed_at
                .map(|t| t.to_rfc3339())
                .unwrap_or_default(),
            trade.pnl.map(|p| format!("{p:.4}")).unwrap_or_default(),
            trade.pnl_pct.map(|p| format!("{p:.4}")).unwrap_or_default(),
            trade.strategy.clone(),
            format!("{}", trade.confidence),
        ])?;
    }
    writer.flush().context("Failed to flush trades CSV")?;
    Ok(())
}

/// Write all artifacts for a run into `output_dir`:
/// `report.json`, `equity.csv`, `trades.csv`.
pub fn export_run(output_dir: &Path, report: &BacktestReport) -> Result<()> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;
    write_report_json(&output_dir.join("report.json"), report)?;
    write_equity_csv(&output_dir.join("equity.csv"), &report.equity_curve)?;
    write_trades_csv(&output_dir.join("trades.csv"), &report.trades)?;
    Ok(())
}
