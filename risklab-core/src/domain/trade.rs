//! Trade — the full lifecycle of one position, from open to close.

use super::ids::{PositionId, TradeId};
use super::position::PositionSide;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One trade: open, or fully closed. No partial-close state exists —
/// `exit_price`, `closed_at`, `pnl`, and `pnl_pct` are all unset or all set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub id: TradeId,
    pub position_id: PositionId,
    pub symbol: String,
    pub side: PositionSide,
    pub size: f64,
    pub entry_price: f64,
    pub opened_at: DateTime<Utc>,

    pub exit_price: Option<f64>,
    pub closed_at: Option<DateTime<Utc>>,
    pub pnl: Option<f64>,
    pub pnl_pct: Option<f64>,

    /// Attribution tag: which strategy produced the entry signal.
    pub strategy: String,
    /// Informational signal confidence in [0, 1].
    pub confidence: f64,
}

impl Trade {
    pub fn is_closed(&self) -> bool {
        self.pnl.is_some()
    }

    pub fn is_winner(&self) -> bool {
        self.pnl.is_some_and(|p| p > 0.0)
    }

    /// Realized P&L if the trade were closed at `exit_price`.
    pub fn pnl_at(&self, exit_price: f64) -> f64 {
        match self.side {
            PositionSide::Long => (exit_price - self.entry_price) * self.size,
            PositionSide::Short => (self.entry_price - exit_price) * self.size,
        }
    }

    /// Finalize the trade. Must be called at most once; the ledger enforces this.
    pub(crate) fn close(&mut self, exit_price: f64, closed_at: DateTime<Utc>) -> f64 {
        let pnl = self.pnl_at(exit_price);
        let basis = self.entry_price * self.size;
        self.exit_price = Some(exit_price);
        self.closed_at = Some(closed_at);
        self.pnl = Some(pnl);
        self.pnl_pct = Some(if basis == 0.0 { 0.0 } else { pnl / basis * 100.0 });
        pnl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn open_trade(side: PositionSide) -> Trade {
        Trade {
            id: TradeId(1),
            position_id: PositionId(1),
            symbol: "BTC".into(),
            side,
            size: 0.1,
            entry_price: 50_000.0,
            opened_at: Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
            exit_price: None,
            closed_at: None,
            pnl: None,
            pnl_pct: None,
            strategy: "test".into(),
            confidence: 0.8,
        }
    }

    #[test]
    fn open_trade_has_no_exit_fields() {
        let trade = open_trade(PositionSide::Long);
        assert!(!trade.is_closed());
        assert!(!trade.is_winner());
        assert!(trade.exit_price.is_none());
        assert!(trade.closed_at.is_none());
    }

    #[test]
    fn close_sets_all_exit_fields_together() {
        let mut trade = open_trade(PositionSide::Long);
        let at = Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap();
        let pnl = trade.close(52_000.0, at);

        assert!((pnl - 200.0).abs() < 1e-10);
        assert!(trade.is_closed());
        assert!(trade.is_winner());
        assert_eq!(trade.exit_price, Some(52_000.0));
        assert_eq!(trade.closed_at, Some(at));
        assert!((trade.pnl_pct.unwrap() - 4.0).abs() < 1e-10);
    }

    #[test]
    fn short_pnl_is_sign_flipped() {
        let mut trade = open_trade(PositionSide::Short);
        let at = Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap();
        let pnl = trade.close(52_000.0, at);
        assert!((pnl + 200.0).abs() < 1e-10);
        assert!(!trade.is_winner());
    }

    #[test]
    fn trade_serialization_roundtrip() {
        let mut trade = open_trade(PositionSide::Long);
        trade.close(52_000.0, Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap());

        let json = serde_json::to_string(&trade).unwrap();
        let deser: Trade = serde_json::from_str(&json).unwrap();
        assert_eq!(trade.id, deser.id);
        assert_eq!(trade.pnl, deser.pnl);
        assert_eq!(trade.strategy, deser.strategy);
    }
}
