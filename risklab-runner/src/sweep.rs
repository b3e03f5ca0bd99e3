//! Parameter sweeps — independent backtests over a grid of risk limits.
//!
//! Each variant gets its own runner, ledger, valuator, and strategy
//! instance; nothing mutable crosses worker boundaries, so variants run in
//! parallel without locking.

use log::warn;
use rayon::prelude::*;
use risklab_core::domain::MarketSample;
use risklab_core::risk::RiskParameters;

use crate::report::BacktestReport;
use crate::runner::BacktestRunner;
use crate::strategy::Strategy;

/// One cell of the sweep grid.
#[derive(Debug, Clone)]
pub struct SweepVariant {
    pub label: String,
    pub params: RiskParameters,
}

/// A finished variant, best-first after sorting.
#[derive(Debug, Clone)]
pub struct SweepEntry {
    pub label: String,
    pub report: BacktestReport,
}

/// Run every variant against the same series, in parallel.
///
/// `make_strategy` builds a fresh strategy per variant so indicator state is
/// never shared. Variants whose strategy fails are dropped with a warning;
/// survivors come back sorted by total return, best first.
pub fn run_sweep<S, F>(
    series: &[MarketSample],
    variants: Vec<SweepVariant>,
    starting_capital: f64,
    make_strategy: F,
) -> Vec<SweepEntry>
where
    S: Strategy,
    F: Fn() -> S + Sync,
{
    let mut entries: Vec<SweepEntry> = variants
        .into_par_iter()
        .filter_map(|variant| {
            let mut runner = BacktestRunner::new(variant.params);
            let mut strategy = make_strategy();
            match runner.run(series, &mut strategy, starting_capital) {
                Ok(report) => Some(SweepEntry {
                    label: variant.label,
                    report,
                }),
                Err(err) => {
                    warn!("sweep variant '{}' failed: {err}", variant.label);
                    None
                }
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.report
            .total_return_pct
            .partial_cmp(&a.report.total_return_pct)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use chrono::{TimeZone, Utc};
    use risklab_core::domain::Signal;
    use risklab_core::PortfolioSummary;

    fn series() -> Vec<MarketSample> {
        (0..4)
            .map(|i| {
                let ts = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap()
                    + chrono::Duration::hours(i as i64);
                MarketSample::new(ts)
                    .with_price("A", 100.0 + i as f64)
                    .with_price("B", 50.0)
            })
            .collect()
    }

    /// Buys one unit of A and one of B on the first sample.
    fn two_buys() -> impl Strategy {
        let mut done = false;
        move |_: &MarketSample, _: &PortfolioSummary| -> Result<Vec<Signal>> {
            if done {
                return Ok(Vec::new());
            }
            done = true;
            Ok(vec![Signal::buy("A", 1.0, 1.0), Signal::buy("B", 1.0, 1.0)])
        }
    }

    #[test]
    fn variants_are_isolated_and_sorted() {
        let tight = RiskParameters {
            max_open_positions: 1,
            ..RiskParameters::default()
        };
        let loose = RiskParameters {
            max_open_positions: 5,
            ..RiskParameters::default()
        };
        let variants = vec![
            SweepVariant { label: "tight".into(), params: tight },
            SweepVariant { label: "loose".into(), params: loose },
        ];

        let entries = run_sweep(&series(), variants, 10_000.0, two_buys);
        assert_eq!(entries.len(), 2);

        let tight_entry = entries.iter().find(|e| e.label == "tight").unwrap();
        let loose_entry = entries.iter().find(|e| e.label == "loose").unwrap();
        // The position-count limit bit only in the tight variant
        assert_eq!(tight_entry.report.total_trades, 1);
        assert_eq!(loose_entry.report.total_trades, 2);
        assert_eq!(tight_entry.report.rejected_signals.len(), 1);

        // Sorted best-first: A rallies, so holding both can't be worse
        assert!(entries[0].report.total_return_pct >= entries[1].report.total_return_pct);
    }

    #[test]
    fn failing_variant_is_dropped() {
        let variants = vec![SweepVariant {
            label: "only".into(),
            params: RiskParameters::default(),
        }];
        let make = || {
            |_: &MarketSample, _: &PortfolioSummary| -> Result<Vec<Signal>> {
                anyhow::bail!("boom")
            }
        };
        let entries = run_sweep(&series(), variants, 10_000.0, make);
        assert!(entries.is_empty());
    }
}
