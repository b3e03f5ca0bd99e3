//! Backtest report — serializable result of one finished (or aborted) run.

use chrono::{DateTime, Utc};
use risklab_core::domain::Trade;
use risklab_core::risk::{Alert, Rejection};
use risklab_core::{stats, Ledger, PortfolioValuator};
use serde::{Deserialize, Serialize};

/// One point of the equity curve: total portfolio value at a sample close.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// How the run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    /// Every sample processed.
    Completed,
    /// Stopped early — cooperative stop or strategy failure. The report
    /// covers everything up to the last completed sample.
    Aborted,
}

/// A signal the validator refused, kept for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectedSignal {
    pub timestamp: DateTime<Utc>,
    pub symbol: String,
    pub rejections: Vec<Rejection>,
}

/// Complete result of a single backtest run. JSON-serializable for the
/// reporting/dashboard collaborators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestReport {
    pub outcome: RunOutcome,
    pub initial_capital: f64,
    pub final_value: f64,
    pub total_return_pct: f64,
    /// All trades executed, open ones included.
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    /// Percentage of closed trades with positive P&L.
    pub win_rate: f64,
    /// Mean / sample stdev of per-trade pnl_pct over closed trades.
    pub sharpe_ratio: f64,
    pub max_drawdown_pct: f64,
    pub sample_count: usize,
    pub equity_curve: Vec<EquityPoint>,
    pub trades: Vec<Trade>,
    pub rejected_signals: Vec<RejectedSignal>,
    pub alerts: Vec<Alert>,
}

impl BacktestReport {
    /// Assemble the report from the finished run's state.
    pub(crate) fn assemble(
        outcome: RunOutcome,
        starting_capital: f64,
        ledger: &Ledger,
        valuator: &PortfolioValuator,
        equity_curve: Vec<EquityPoint>,
        rejected_signals: Vec<RejectedSignal>,
        alerts: Vec<Alert>,
    ) -> Self {
        let portfolio = ledger.portfolio();
        let closed_pnl_pcts: Vec<f64> = portfolio
            .closed_trades()
            .filter_map(|t| t.pnl_pct)
            .collect();
        let winners = portfolio.closed_trades().filter(|t| t.is_winner()).count();
        let losers = portfolio
            .closed_trades()
            .filter(|t| t.pnl.is_some_and(|p| p < 0.0))
            .count();

        let final_value = equity_curve
            .last()
            .map(|p| p.value)
            .unwrap_or(starting_capital);
        let total_return_pct = if starting_capital > 0.0 {
            (final_value - starting_capital) / starting_capital * 100.0
        } else {
            0.0
        };

        Self {
            outcome,
            initial_capital: starting_capital,
            final_value,
            total_return_pct,
            total_trades: portfolio.trade_history.len(),
            winning_trades: winners,
            losing_trades: losers,
            win_rate: stats::win_rate_pct(winners, closed_pnl_pcts.len()),
            sharpe_ratio: stats::sharpe_ratio(&closed_pnl_pcts),
            max_drawdown_pct: valuator.max_drawdown_pct(),
            sample_count: equity_curve.len(),
            equity_curve,
            trades: portfolio.trade_history.clone(),
            rejected_signals,
            alerts,
        }
    }
}
