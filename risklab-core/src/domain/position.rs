//! Position — one open exposure, marked to market every tick.

use super::ids::PositionId;
use serde::{Deserialize, Serialize};

/// Direction of an exposure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionSide {
    Long,
    Short,
}

impl std::fmt::Display for PositionSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PositionSide::Long => write!(f, "long"),
            PositionSide::Short => write!(f, "short"),
        }
    }
}

/// An open position.
///
/// `current_price` is replaced (never accumulated) by the ledger's
/// mark-to-market step, so revaluing twice with the same prices is a no-op.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    pub id: PositionId,
    pub symbol: String,
    pub side: PositionSide,
    /// Quantity, strictly positive for both sides.
    pub size: f64,
    pub entry_price: f64,
    /// Latest market price; equals `entry_price` until the first revaluation.
    pub current_price: f64,
}

impl Position {
    pub fn new(
        id: PositionId,
        symbol: String,
        side: PositionSide,
        size: f64,
        entry_price: f64,
    ) -> Self {
        Self {
            id,
            symbol,
            side,
            size,
            entry_price,
            current_price: entry_price,
        }
    }

    /// Capital committed at entry.
    pub fn cost_basis(&self) -> f64 {
        self.size * self.entry_price
    }

    /// Paper P&L at the current price.
    pub fn unrealized_pnl(&self) -> f64 {
        match self.side {
            PositionSide::Long => (self.current_price - self.entry_price) * self.size,
            PositionSide::Short => (self.entry_price - self.current_price) * self.size,
        }
    }

    /// Paper P&L as a percentage of cost basis.
    pub fn unrealized_pnl_pct(&self) -> f64 {
        let basis = self.cost_basis();
        if basis == 0.0 {
            return 0.0;
        }
        self.unrealized_pnl() / basis * 100.0
    }

    /// Liquidation value: cost basis plus paper P&L.
    ///
    /// For longs this reduces to `size * current_price`. For shorts the entry
    /// cost is held as collateral, so the value is collateral plus P&L.
    pub fn market_value(&self) -> f64 {
        self.cost_basis() + self.unrealized_pnl()
    }
}
