use serde::{Deserialize, Serialize};
use std::fmt;

/// Position ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PositionId(pub u64);

impl fmt::Display for PositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Trade ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TradeId(pub u64);

impl fmt::Display for TradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

/// Monotonic ID generator owned by the ledger.
///
/// Every open gets a fresh position ID and trade ID; IDs are never reused
/// within a run, so closed trades stay addressable in the history.
#[derive(Debug, Clone, Default)]
pub struct IdGen {
    next_position: u64,
    next_trade: u64,
}

impl IdGen {
    pub fn next_position_id(&mut self) -> PositionId {
        self.next_position += 1;
        PositionId(self.next_position)
    }

    pub fn next_trade_id(&mut self) -> TradeId {
        self.next_trade += 1;
        TradeId(self.next_trade)
    }
}
