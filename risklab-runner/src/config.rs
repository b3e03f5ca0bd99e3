//! Serializable backtest configuration.
//!
//! TOML in, validated config out. The engine never reads files itself; this
//! loader is a convenience for callers that keep run settings on disk.

use risklab_core::risk::RiskParameters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Configuration for a single backtest run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestConfig {
    pub backtest: BacktestSection,
    #[serde(default)]
    pub risk: RiskParameters,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestSection {
    #[serde(default = "default_initial_capital")]
    pub initial_capital: f64,
    /// Optional human-readable label carried into sweep entries and logs.
    #[serde(default)]
    pub label: Option<String>,
}

fn default_initial_capital() -> f64 {
    10_000.0
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            backtest: BacktestSection {
                initial_capital: default_initial_capital(),
                label: None,
            },
            risk: RiskParameters::default(),
        }
    }
}

impl BacktestConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backtest.initial_capital <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "initial_capital must be positive, got {}",
                self.backtest.initial_capital
            )));
        }
        let pcts = [
            ("max_position_size_pct", self.risk.max_position_size_pct),
            ("max_daily_loss_pct", self.risk.max_daily_loss_pct),
            (
                "max_portfolio_drawdown_pct",
                self.risk.max_portfolio_drawdown_pct,
            ),
            ("stop_loss_pct", self.risk.stop_loss_pct),
            ("take_profit_pct", self.risk.take_profit_pct),
            ("max_total_exposure_pct", self.risk.max_total_exposure_pct),
        ];
        for (name, value) in pcts {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if self.risk.max_open_positions == 0 {
            return Err(ConfigError::Invalid(
                "max_open_positions must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
