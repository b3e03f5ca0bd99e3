//! Portfolio — aggregate state of cash + open positions + trade history.

use super::ids::PositionId;
use super::position::Position;
use super::trade::Trade;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Aggregate portfolio state, owned exclusively by the ledger.
///
/// The capital identity must hold after every mutation:
/// `cash + sum(open cost bases) == initial_capital + sum(realized pnl)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portfolio {
    pub initial_capital: f64,
    pub cash: f64,
    pub positions: HashMap<PositionId, Position>,
    /// Append-only; closed trades are finalized in place, never removed.
    pub trade_history: Vec<Trade>,
}

impl Portfolio {
    pub fn new(initial_capital: f64) -> Self {
        Self {
            initial_capital,
            cash: initial_capital,
            positions: HashMap::new(),
            trade_history: Vec::new(),
        }
    }

    /// Capital committed to open positions at their entry prices.
    pub fn open_cost_basis(&self) -> f64 {
        self.positions.values().map(Position::cost_basis).sum()
    }

    /// Mark-to-market value of all open positions.
    pub fn positions_value(&self) -> f64 {
        self.positions.values().map(Position::market_value).sum()
    }

    /// Total equity = cash + open position values.
    pub fn total_value(&self) -> f64 {
        self.cash + self.positions_value()
    }

    /// Realized P&L over all closed trades.
    pub fn realized_pnl(&self) -> f64 {
        self.trade_history.iter().filter_map(|t| t.pnl).sum()
    }

    pub fn closed_trades(&self) -> impl Iterator<Item = &Trade> {
        self.trade_history.iter().filter(|t| t.is_closed())
    }

    pub fn open_position_count(&self) -> usize {
        self.positions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::position::PositionSide;

    #[test]
    fn fresh_portfolio_is_all_cash() {
        let portfolio = Portfolio::new(10_000.0);
        assert_eq!(portfolio.cash, 10_000.0);
        assert_eq!(portfolio.total_value(), 10_000.0);
        assert_eq!(portfolio.open_position_count(), 0);
        assert_eq!(portfolio.realized_pnl(), 0.0);
    }

    #[test]
    fn total_value_includes_position_values() {
        let mut portfolio = Portfolio::new(10_000.0);
        portfolio.cash = 5_000.0;
        let mut pos = Position::new(
            PositionId(1),
            "BTC".into(),
            PositionSide::Long,
            0.1,
            50_000.0,
        );
        pos.current_price = 52_000.0;
        portfolio.positions.insert(pos.id, pos);

        assert!((portfolio.positions_value() - 5_200.0).abs() < 1e-10);
        assert!((portfolio.total_value() - 10_200.0).abs() < 1e-10);
        assert!((portfolio.open_cost_basis() - 5_000.0).abs() < 1e-10);
    }
}
