//! Signal — strategy output consumed by the backtest runner.

use serde::{Deserialize, Serialize};

/// What the strategy wants to do with a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalAction {
    Buy,
    Sell,
    Hold,
}

/// One strategy decision for one symbol.
///
/// `size` is the requested quantity for a buy; ignored for sell (the whole
/// position is closed) and hold. `confidence` is informational, carried onto
/// the resulting trade for attribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signal {
    pub symbol: String,
    pub action: SignalAction,
    pub size: f64,
    pub confidence: f64,
}

impl Signal {
    pub fn buy(symbol: impl Into<String>, size: f64, confidence: f64) -> Self {
        Self {
            symbol: symbol.into(),
            action: SignalAction::Buy,
            size,
            confidence,
        }
    }

    pub fn sell(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            action: SignalAction::Sell,
            size: 0.0,
            confidence: 1.0,
        }
    }

    pub fn hold(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            action: SignalAction::Hold,
            size: 0.0,
            confidence: 1.0,
        }
    }

    pub fn is_hold(&self) -> bool {
        self.action == SignalAction::Hold
    }
}
