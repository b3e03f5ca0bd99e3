//! RiskLab Runner — backtest orchestration over `risklab-core`.
//!
//! The runner drives the deterministic replay loop: feed each historical
//! sample through mark-to-market, the caller's strategy, the risk validator,
//! and the ledger, then record the equity curve and threshold alerts.
//! Around it live the supporting pieces: TOML config loading, JSON/CSV
//! artifact export, parallel parameter sweeps, and run fingerprinting.

pub mod config;
pub mod export;
pub mod fingerprint;
pub mod report;
pub mod runner;
pub mod strategy;
pub mod sweep;

pub use config::{BacktestConfig, ConfigError};
pub use report::{BacktestReport, EquityPoint, RejectedSignal, RunOutcome};
pub use runner::{BacktestError, BacktestRunner, RunState, StopHandle};
pub use strategy::{MaCrossStrategy, Strategy};
pub use sweep::{run_sweep, SweepEntry, SweepVariant};
