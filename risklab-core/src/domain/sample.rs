//! MarketSample — one timestamped slice of the historical price feed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single observation from the price feed: per-symbol prices and volumes
/// at one instant. Volumes are informational; the engine trades on prices.
///
/// Maps are ordered so samples serialize canonically — run fingerprints
/// hash the serialized form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketSample {
    pub timestamp: DateTime<Utc>,
    pub prices: BTreeMap<String, f64>,
    pub volumes: BTreeMap<String, f64>,
}

impl MarketSample {
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            prices: BTreeMap::new(),
            volumes: BTreeMap::new(),
        }
    }

    pub fn with_price(mut self, symbol: impl Into<String>, price: f64) -> Self {
        self.prices.insert(symbol.into(), price);
        self
    }

    pub fn with_volume(mut self, symbol: impl Into<String>, volume: f64) -> Self {
        self.volumes.insert(symbol.into(), volume);
        self
    }

    pub fn price(&self, symbol: &str) -> Option<f64> {
        self.prices.get(symbol).copied()
    }
}
