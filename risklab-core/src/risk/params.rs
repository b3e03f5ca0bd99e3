//! Risk parameters — configurable limits, pure data.
//!
//! Mutated only by the operator / config loader, never by the engine.

use serde::{Deserialize, Serialize};

/// Limits checked by the validator and alerting. All percentages are in
/// [0, 100] units (10.0 means 10%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskParameters {
    /// Max single-trade value as a percentage of total portfolio value.
    pub max_position_size_pct: f64,
    /// Max absolute daily loss as a percentage of initial capital.
    pub max_daily_loss_pct: f64,
    /// Max decline from the running portfolio peak.
    pub max_portfolio_drawdown_pct: f64,
    /// Stop-loss distance used for risk-based position sizing.
    pub stop_loss_pct: f64,
    /// Take-profit distance, advisory only.
    pub take_profit_pct: f64,
    pub max_open_positions: usize,
    /// Max total open-position value as a percentage of portfolio value.
    pub max_total_exposure_pct: f64,
}

impl Default for RiskParameters {
    fn default() -> Self {
        Self {
            max_position_size_pct: 10.0,
            max_daily_loss_pct: 5.0,
            max_portfolio_drawdown_pct: 20.0,
            stop_loss_pct: 5.0,
            take_profit_pct: 10.0,
            max_open_positions: 5,
            max_total_exposure_pct: 80.0,
        }
    }
}
