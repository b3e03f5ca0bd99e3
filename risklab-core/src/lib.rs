//! RiskLab Core — ledger, valuation, and risk framework for the sandbox
//! trading engine.
//!
//! This crate contains the deterministic heart of the system:
//! - Domain types (samples, signals, positions, trades, portfolio)
//! - Trade ledger: the sole writer of capital and position state
//! - Portfolio valuator: mark-to-market summaries, drawdown tracking
//! - Risk validator: limit checks as data, not exceptions
//! - Risk alerting: threshold events for an external notification sink
//!
//! No I/O happens here. Orchestration (replay loop, reports, sweeps,
//! config, export) lives in `risklab-runner`.

pub mod domain;
pub mod ledger;
pub mod risk;
pub mod stats;
pub mod valuation;

pub use ledger::{Ledger, LedgerError};
pub use valuation::{PortfolioSummary, PortfolioValuator};
