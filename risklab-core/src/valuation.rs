//! Portfolio valuation — mark-to-market summaries and running drawdown state.
//!
//! `PortfolioValuator` is the single owner of the running peak / drawdown /
//! daily-anchor state for one run. The runner drives it with exactly two
//! update calls per sample: `begin_sample` (rolls the daily P&L anchor at UTC
//! date boundaries) and `observe` (advances peak and max drawdown). Between
//! those, `summary` is a pure read.

use crate::domain::Portfolio;
use crate::stats;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of portfolio health at one instant. Serializable for reporting
/// and notification collaborators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub total_value: f64,
    pub cash: f64,
    pub positions_value: f64,
    pub initial_capital: f64,
    pub total_pnl: f64,
    pub total_pnl_pct: f64,
    pub open_trades: usize,
    pub closed_trades: usize,
    /// Percentage of closed trades with positive P&L; 0 with no closed trades.
    pub win_rate: f64,
    /// Mean / sample stdev of per-trade pnl_pct; 0 below 2 closed trades.
    pub sharpe_ratio: f64,
    /// Change in total value since the start of the current UTC day.
    pub daily_pnl: f64,
    /// Decline from the running peak, floored at 0.
    pub current_drawdown_pct: f64,
    pub max_drawdown_pct: f64,
}

/// Long-lived valuator for one run.
#[derive(Debug, Clone)]
pub struct PortfolioValuator {
    peak_value: f64,
    max_drawdown_pct: f64,
    /// Total value at the most recent `observe` call.
    last_value: f64,
    /// Total value at the end of the previous UTC day.
    day_anchor: f64,
    current_day: Option<NaiveDate>,
}

impl PortfolioValuator {
    pub fn new(starting_capital: f64) -> Self {
        Self {
            peak_value: starting_capital,
            max_drawdown_pct: 0.0,
            last_value: starting_capital,
            day_anchor: starting_capital,
            current_day: None,
        }
    }

    /// Roll the daily P&L anchor when the sample's UTC date changes.
    ///
    /// Called once at the start of each sample step, before any reads.
    pub fn begin_sample(&mut self, timestamp: DateTime<Utc>) {
        let date = timestamp.date_naive();
        if self.current_day != Some(date) {
            if self.current_day.is_some() {
                self.day_anchor = self.last_value;
            }
            self.current_day = Some(date);
        }
    }

    /// Record the post-trade total value for this sample.
    ///
    /// The only path that advances `peak_value` and `max_drawdown_pct`, which
    /// keeps max drawdown non-decreasing across a run.
    pub fn observe(&mut self, total_value: f64) {
        if total_value > self.peak_value {
            self.peak_value = total_value;
        }
        let drawdown = self.drawdown_pct(total_value);
        if drawdown > self.max_drawdown_pct {
            self.max_drawdown_pct = drawdown;
        }
        self.last_value = total_value;
    }

    /// Pure read: compute a full summary from the portfolio's current marks.
    pub fn summary(&self, portfolio: &Portfolio) -> PortfolioSummary {
        let total_value = portfolio.total_value();
        let initial = portfolio.initial_capital;

        let closed_pnl_pcts: Vec<f64> = portfolio
            .closed_trades()
            .filter_map(|t| t.pnl_pct)
            .collect();
        let closed = closed_pnl_pcts.len();
        let winners = portfolio.closed_trades().filter(|t| t.is_winner()).count();

        PortfolioSummary {
            total_value,
            cash: portfolio.cash,
            positions_value: portfolio.positions_value(),
            initial_capital: initial,
            total_pnl: total_value - initial,
            total_pnl_pct: if initial > 0.0 {
                (total_value - initial) / initial * 100.0
            } else {
                0.0
            },
            open_trades: portfolio.open_position_count(),
            closed_trades: closed,
            win_rate: stats::win_rate_pct(winners, closed),
            sharpe_ratio: stats::sharpe_ratio(&closed_pnl_pcts),
            daily_pnl: total_value - self.day_anchor,
            current_drawdown_pct: self.drawdown_pct(total_value),
            max_drawdown_pct: self.max_drawdown_pct,
        }
    }

    pub fn peak_value(&self) -> f64 {
        self.peak_value
    }

    pub fn max_drawdown_pct(&self) -> f64 {
        self.max_drawdown_pct
    }

    fn drawdown_pct(&self, total_value: f64) -> f64 {
        if self.peak_value <= 0.0 {
            return 0.0;
        }
        ((self.peak_value - total_value) / self.peak_value * 100.0).max(0.0)
    }
}
