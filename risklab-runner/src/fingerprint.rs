//! Run fingerprinting — deterministic identity for (config, dataset) pairs.
//!
//! Two runs with identical config and identical input data get the same ID,
//! so downstream consumers can dedupe or cache results. `MarketSample` maps
//! are ordered, so serialization — and therefore the hash — is stable.

use risklab_core::domain::MarketSample;

use crate::config::BacktestConfig;

/// Content hash of the historical series.
pub fn dataset_hash(series: &[MarketSample]) -> String {
    let json = serde_json::to_string(series).expect("MarketSample serialization failed");
    blake3::hash(json.as_bytes()).to_hex().to_string()
}

/// Deterministic run ID over configuration and dataset.
pub fn run_id(config: &BacktestConfig, series: &[MarketSample]) -> String {
    let config_json = serde_json::to_string(config).expect("BacktestConfig serialization failed");
    let mut hasher = blake3::Hasher::new();
    hasher.update(config_json.as_bytes());
    hasher.update(dataset_hash(series).as_bytes());
    hasher.finalize().to_hex().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn series(price: f64) -> Vec<MarketSample> {
        let ts = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        vec![MarketSample::new(ts).with_price("BTC", price)]
    }

    #[test]
    fn same_inputs_same_id() {
        let config = BacktestConfig::default();
        assert_eq!(run_id(&config, &series(100.0)), run_id(&config, &series(100.0)));
    }

    #[test]
    fn different_data_different_id() {
        let config = BacktestConfig::default();
        assert_ne!(run_id(&config, &series(100.0)), run_id(&config, &series(101.0)));
    }

    #[test]
    fn different_config_different_id() {
        let a = BacktestConfig::default();
        let mut b = BacktestConfig::default();
        b.risk.max_open_positions = 1;
        assert_ne!(run_id(&a, &series(100.0)), run_id(&b, &series(100.0)));
    }
}
