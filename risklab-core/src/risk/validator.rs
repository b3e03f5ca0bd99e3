//! Risk validator — read-only gatekeeper run before every trade entry.
//!
//! Validation failures are data, not errors: every check is evaluated and
//! every violation is reported, so the caller sees the full picture at once.

use crate::domain::PositionSide;
use crate::risk::params::RiskParameters;
use crate::valuation::PortfolioSummary;
use serde::{Deserialize, Serialize};

/// A proposed entry, before the ledger has seen it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeIntent {
    pub symbol: String,
    pub side: PositionSide,
    pub size: f64,
    pub price: f64,
}

impl TradeIntent {
    pub fn value(&self) -> f64 {
        self.size * self.price
    }
}

/// Which limit a rejection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskCheck {
    PositionSize,
    Capital,
    PositionCount,
    DailyLoss,
    Drawdown,
}

impl std::fmt::Display for RiskCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskCheck::PositionSize => write!(f, "position-size"),
            RiskCheck::Capital => write!(f, "capital"),
            RiskCheck::PositionCount => write!(f, "position-count"),
            RiskCheck::DailyLoss => write!(f, "daily-loss"),
            RiskCheck::Drawdown => write!(f, "drawdown"),
        }
    }
}

/// One violated limit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rejection {
    pub check: RiskCheck,
    pub message: String,
}

/// Outcome of validating one intent. `valid` is true iff no check fired.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub rejections: Vec<Rejection>,
    /// Advisory notes; never block execution.
    pub recommendations: Vec<String>,
    /// Stop-loss-risk-based size suggestion. Advisory: the caller decides
    /// whether to use it.
    pub recommended_size: Option<f64>,
}

/// Evaluate all five limit checks against the current portfolio summary.
pub fn validate(
    intent: &TradeIntent,
    summary: &PortfolioSummary,
    params: &RiskParameters,
) -> ValidationResult {
    let mut rejections = Vec::new();
    let mut recommendations = Vec::new();
    let trade_value = intent.value();

    // 1. Position size vs. portfolio value
    if summary.total_value > 0.0 {
        let pct = trade_value / summary.total_value * 100.0;
        if pct > params.max_position_size_pct {
            rejections.push(Rejection {
                check: RiskCheck::PositionSize,
                message: format!(
                    "position is {pct:.1}% of portfolio, limit {:.1}%",
                    params.max_position_size_pct
                ),
            });
        }
    }

    // 2. Available capital
    if trade_value > summary.cash {
        rejections.push(Rejection {
            check: RiskCheck::Capital,
            message: format!(
                "trade value {trade_value:.2} exceeds cash {:.2}",
                summary.cash
            ),
        });
    }

    // 3. Open position count
    if summary.open_trades >= params.max_open_positions {
        rejections.push(Rejection {
            check: RiskCheck::PositionCount,
            message: format!(
                "{} positions open, limit {}",
                summary.open_trades, params.max_open_positions
            ),
        });
    }

    // 4. Daily loss
    let daily_loss_limit = summary.initial_capital * params.max_daily_loss_pct / 100.0;
    if summary.daily_pnl.abs() >= daily_loss_limit {
        rejections.push(Rejection {
            check: RiskCheck::DailyLoss,
            message: format!(
                "daily pnl {:.2} at or beyond limit {daily_loss_limit:.2}",
                summary.daily_pnl
            ),
        });
    }

    // 5. Drawdown
    if summary.current_drawdown_pct >= params.max_portfolio_drawdown_pct {
        rejections.push(Rejection {
            check: RiskCheck::Drawdown,
            message: format!(
                "drawdown {:.1}% at or beyond limit {:.1}%",
                summary.current_drawdown_pct, params.max_portfolio_drawdown_pct
            ),
        });
    }

    let recommended_size = recommended_size(intent.price, summary, params);
    if let Some(size) = recommended_size {
        recommendations.push(format!("risk-based size for {}: {size:.6}", intent.symbol));
        let (stop, target) = match intent.side {
            PositionSide::Long => (
                intent.price * (1.0 - params.stop_loss_pct / 100.0),
                intent.price * (1.0 + params.take_profit_pct / 100.0),
            ),
            PositionSide::Short => (
                intent.price * (1.0 + params.stop_loss_pct / 100.0),
                intent.price * (1.0 - params.take_profit_pct / 100.0),
            ),
        };
        recommendations.push(format!("stop loss {stop:.2}, take profit {target:.2}"));
    }

    ValidationResult {
        valid: rejections.is_empty(),
        rejections,
        recommendations,
        recommended_size,
    }
}

/// Stop-loss-based sizing: cap the position value at the size limit, then
/// shrink it further so the amount at risk before the stop fires never
/// exceeds that same cap.
fn recommended_size(
    entry_price: f64,
    summary: &PortfolioSummary,
    params: &RiskParameters,
) -> Option<f64> {
    if entry_price <= 0.0 || summary.total_value <= 0.0 || params.stop_loss_pct <= 0.0 {
        return None;
    }
    let max_position_value = summary.total_value * params.max_position_size_pct / 100.0;
    let risk_per_unit = entry_price * params.stop_loss_pct / 100.0;
    Some((max_position_value / entry_price).min(max_position_value / risk_per_unit))
}
