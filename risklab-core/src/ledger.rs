//! Trade ledger — the sole writer of portfolio state.
//!
//! All capital and position mutation funnels through `open_trade`,
//! `close_trade`, and `mark_to_market`. Everything else in the crate reads
//! snapshots. One ledger per backtest run; there is no global instance.

use crate::domain::{
    IdGen, Portfolio, Position, PositionId, PositionSide, Trade, TradeId,
};
use chrono::{DateTime, Utc};
use log::debug;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors from ledger mutations. All are local and recoverable: a failed
/// open or close leaves the portfolio untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    #[error("insufficient capital: trade costs {required:.2}, cash is {available:.2}")]
    InsufficientCapital { required: f64, available: f64 },
    #[error("invalid size {0}: must be positive")]
    InvalidSize(f64),
    #[error("invalid price {0}: must be positive")]
    InvalidPrice(f64),
    #[error("trade {0} not found")]
    TradeNotFound(TradeId),
    #[error("trade {0} already closed")]
    TradeAlreadyClosed(TradeId),
}

/// Owns the portfolio aggregate and issues IDs.
#[derive(Debug, Clone)]
pub struct Ledger {
    portfolio: Portfolio,
    id_gen: IdGen,
}

impl Ledger {
    pub fn new(initial_capital: f64) -> Self {
        Self {
            portfolio: Portfolio::new(initial_capital),
            id_gen: IdGen::default(),
        }
    }

    /// Open a position: deduct cash, insert the position, append an open trade.
    ///
    /// The entry cost (`size * price`) is deducted for both sides; for shorts
    /// it is held as collateral and returned with the P&L at close.
    #[allow(clippy::too_many_arguments)]
    pub fn open_trade(
        &mut self,
        symbol: &str,
        side: PositionSide,
        size: f64,
        price: f64,
        strategy: &str,
        confidence: f64,
        at: DateTime<Utc>,
    ) -> Result<TradeId, LedgerError> {
        if size <= 0.0 || !size.is_finite() {
            return Err(LedgerError::InvalidSize(size));
        }
        if price <= 0.0 || !price.is_finite() {
            return Err(LedgerError::InvalidPrice(price));
        }
        let cost = size * price;
        if cost > self.portfolio.cash {
            return Err(LedgerError::InsufficientCapital {
                required: cost,
                available: self.portfolio.cash,
            });
        }

        let position_id = self.id_gen.next_position_id();
        let trade_id = self.id_gen.next_trade_id();

        self.portfolio.cash -= cost;
        self.portfolio.positions.insert(
            position_id,
            Position::new(position_id, symbol.to_string(), side, size, price),
        );
        self.portfolio.trade_history.push(Trade {
            id: trade_id,
            position_id,
            symbol: symbol.to_string(),
            side,
            size,
            entry_price: price,
            opened_at: at,
            exit_price: None,
            closed_at: None,
            pnl: None,
            pnl_pct: None,
            strategy: strategy.to_string(),
            confidence,
        });

        debug!("opened {trade_id}: {side} {size} {symbol} @ {price}");
        self.debug_check_identity();
        Ok(trade_id)
    }

    /// Close a trade: finalize it, credit cash, remove the position.
    ///
    /// Cash is credited with cost basis plus realized P&L — for longs that is
    /// exactly `size * exit_price`; for shorts the collateral comes back with
    /// the sign-flipped P&L. Returns the realized P&L.
    pub fn close_trade(
        &mut self,
        trade_id: TradeId,
        exit_price: f64,
        at: DateTime<Utc>,
    ) -> Result<f64, LedgerError> {
        if exit_price <= 0.0 || !exit_price.is_finite() {
            return Err(LedgerError::InvalidPrice(exit_price));
        }
        let trade = self
            .portfolio
            .trade_history
            .iter_mut()
            .find(|t| t.id == trade_id)
            .ok_or(LedgerError::TradeNotFound(trade_id))?;
        if trade.is_closed() {
            return Err(LedgerError::TradeAlreadyClosed(trade_id));
        }

        let pnl = trade.close(exit_price, at);
        let basis = trade.entry_price * trade.size;
        let position_id = trade.position_id;

        self.portfolio.cash += basis + pnl;
        self.portfolio.positions.remove(&position_id);

        debug!("closed {trade_id} @ {exit_price}, realized pnl {pnl:.2}");
        self.debug_check_identity();
        Ok(pnl)
    }

    /// Replace each open position's `current_price` with the latest price.
    ///
    /// Symbols absent from `prices` keep their previous mark. Prices are
    /// replaced, never accumulated, so this is idempotent for fixed input.
    pub fn mark_to_market(&mut self, prices: &BTreeMap<String, f64>) {
        for position in self.portfolio.positions.values_mut() {
            if let Some(&price) = prices.get(&position.symbol) {
                position.current_price = price;
            }
        }
    }

    /// Read-only snapshot of the open positions.
    pub fn open_positions(&self) -> Vec<Position> {
        self.portfolio.positions.values().cloned().collect()
    }

    /// The open trade for `symbol`, if any.
    pub fn open_trade_for_symbol(&self, symbol: &str) -> Option<&Trade> {
        self.portfolio
            .trade_history
            .iter()
            .find(|t| !t.is_closed() && t.symbol == symbol)
    }

    pub fn position(&self, id: PositionId) -> Option<&Position> {
        self.portfolio.positions.get(&id)
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    pub fn cash(&self) -> f64 {
        self.portfolio.cash
    }

    pub fn initial_capital(&self) -> f64 {
        self.portfolio.initial_capital
    }

    pub fn realized_pnl(&self) -> f64 {
        self.portfolio.realized_pnl()
    }

    pub fn trade_history(&self) -> &[Trade] {
        &self.portfolio.trade_history
    }

    /// Capital identity: `cash + open cost bases == initial + realized pnl`.
    /// Checked after every mutation in debug builds.
    fn debug_check_identity(&self) {
        #[cfg(debug_assertions)]
        {
            let lhs = self.portfolio.cash + self.portfolio.open_cost_basis();
            let rhs = self.portfolio.initial_capital + self.portfolio.realized_pnl();
            debug_assert!(
                (lhs - rhs).abs() < 1e-6,
                "capital identity violated: cash+basis={lhs}, initial+realized={rhs}"
            );
        }
    }
}
