//! Backtest runner — one deterministic replay of history through a strategy.
//!
//! Each sample is processed strictly in order: mark-to-market, strategy
//! call, validate-then-execute, equity-curve append, drawdown update,
//! threshold alerting. Every run owns a fresh ledger and valuator, so
//! independent runs can execute in parallel without any shared state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info, warn};
use thiserror::Error;

use risklab_core::domain::{MarketSample, PositionSide, SignalAction};
use risklab_core::risk::{self, RiskParameters, TradeIntent};
use risklab_core::{Ledger, PortfolioValuator};

use crate::report::{BacktestReport, EquityPoint, RejectedSignal, RunOutcome};
use crate::strategy::Strategy;

/// Runner lifecycle. One-way: `Initialized → Running → Completed | Aborted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Initialized,
    Running,
    Completed,
    Aborted,
}

/// Cooperative stop flag, checked between samples.
///
/// Clone it out of the runner and trip it from another thread; the run ends
/// after the current sample with a consistent `Aborted` report.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_stop_requested(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// The only fatal error class: the strategy itself failed.
///
/// Ledger-level rejections are routine no-ops, never errors.
#[derive(Debug, Error)]
pub enum BacktestError {
    #[error("strategy failed at sample {sample_index}: {cause}")]
    Strategy {
        sample_index: usize,
        cause: anyhow::Error,
        /// Report finalized from everything collected before the failure.
        report: Box<BacktestReport>,
    },
}

/// Drives one replay at a time. Reusable: each `run` call starts from a
/// fresh ledger and valuator.
#[derive(Debug)]
pub struct BacktestRunner {
    params: RiskParameters,
    state: RunState,
    stop: StopHandle,
}

impl BacktestRunner {
    pub fn new(params: RiskParameters) -> Self {
        Self {
            params,
            state: RunState::Initialized,
            stop: StopHandle::new(),
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn params(&self) -> &RiskParameters {
        &self.params
    }

    /// Handle for aborting this runner's current (or next) run.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Replay `series` through `strategy`, starting from `starting_capital`.
    pub fn run(
        &mut self,
        series: &[MarketSample],
        strategy: &mut dyn Strategy,
        starting_capital: f64,
    ) -> Result<BacktestReport, BacktestError> {
        self.state = RunState::Running;
        let mut ledger = Ledger::new(starting_capital);
        let mut valuator = PortfolioValuator::new(starting_capital);
        let mut equity_curve: Vec<EquityPoint> = Vec::with_capacity(series.len());
        let mut rejected_signals: Vec<RejectedSignal> = Vec::new();
        let mut alerts = Vec::new();
        let mut outcome = RunOutcome::Completed;

        info!(
            "backtest start: {} samples, strategy '{}', capital {starting_capital:.2}",
            series.len(),
            strategy.name()
        );

        for (index, sample) in series.iter().enumerate() {
            if self.stop.is_stop_requested() {
                info!("stop requested, aborting after {index} samples");
                outcome = RunOutcome::Aborted;
                break;
            }

            valuator.begin_sample(sample.timestamp);
            ledger.mark_to_market(&sample.prices);
            let mut summary = valuator.summary(ledger.portfolio());

            let signals = match strategy.on_sample(sample, &summary) {
                Ok(signals) => signals,
                Err(cause) => {
                    // The ledger is consistent (mark-to-market completed, no
                    // mutation in flight), so this sample still gets its
                    // equity point before the error surfaces.
                    equity_curve.push(EquityPoint {
                        timestamp: sample.timestamp,
                        value: summary.total_value,
                    });
                    valuator.observe(summary.total_value);
                    self.state = RunState::Aborted;
                    warn!("strategy '{}' failed at sample {index}: {cause}", strategy.name());
                    let report = BacktestReport::assemble(
                        RunOutcome::Aborted,
                        starting_capital,
                        &ledger,
                        &valuator,
                        equity_curve,
                        rejected_signals,
                        alerts,
                    );
                    return Err(BacktestError::Strategy {
                        sample_index: index,
                        cause,
                        report: Box::new(report),
                    });
                }
            };

            for signal in signals.iter().filter(|s| !s.is_hold()) {
                let Some(price) = sample.price(&signal.symbol) else {
                    debug!("no price for {} at sample {index}, skipping signal", signal.symbol);
                    continue;
                };

                match signal.action {
                    SignalAction::Buy => {
                        let intent = TradeIntent {
                            symbol: signal.symbol.clone(),
                            side: PositionSide::Long,
                            size: signal.size,
                            price,
                        };
                        let validation = risk::validate(&intent, &summary, &self.params);
                        if !validation.valid {
                            warn!(
                                "signal for {} rejected: {}",
                                signal.symbol,
                                validation
                                    .rejections
                                    .iter()
                                    .map(|r| r.message.as_str())
                                    .collect::<Vec<_>>()
                                    .join("; ")
                            );
                            rejected_signals.push(RejectedSignal {
                                timestamp: sample.timestamp,
                                symbol: signal.symbol.clone(),
                                rejections: validation.rejections,
                            });
                            continue;
                        }
                        match ledger.open_trade(
                            &signal.symbol,
                            PositionSide::Long,
                            signal.size,
                            price,
                            strategy.name(),
                            signal.confidence,
                            sample.timestamp,
                        ) {
                            Ok(trade_id) => {
                                debug!("sample {index}: opened {trade_id}");
                                summary = valuator.summary(ledger.portfolio());
                            }
                            // Rejected entries are no-ops for this step
                            Err(err) => warn!("open failed for {}: {err}", signal.symbol),
                        }
                    }
                    SignalAction::Sell => {
                        let Some(trade_id) =
                            ledger.open_trade_for_symbol(&signal.symbol).map(|t| t.id)
                        else {
                            debug!("sell for {} with no open position", signal.symbol);
                            continue;
                        };
                        match ledger.close_trade(trade_id, price, sample.timestamp) {
                            Ok(pnl) => {
                                debug!("sample {index}: closed {trade_id}, pnl {pnl:.2}");
                                summary = valuator.summary(ledger.portfolio());
                            }
                            Err(err) => warn!("close failed for {}: {err}", signal.symbol),
                        }
                    }
                    SignalAction::Hold => unreachable!("hold signals filtered above"),
                }
            }

            let end_value = ledger.portfolio().total_value();
            equity_curve.push(EquityPoint {
                timestamp: sample.timestamp,
                value: end_value,
            });
            valuator.observe(end_value);

            let end_summary = valuator.summary(ledger.portfolio());
            for alert in risk::check_thresholds(&end_summary, &self.params) {
                warn!("risk alert: {}", alert.message);
                alerts.push(alert);
            }
        }

        self.state = match outcome {
            RunOutcome::Completed => RunState::Completed,
            RunOutcome::Aborted => RunState::Aborted,
        };
        let report = BacktestReport::assemble(
            outcome,
            starting_capital,
            &ledger,
            &valuator,
            equity_curve,
            rejected_signals,
            alerts,
        );
        info!(
            "backtest done: {:?}, final value {:.2}, {} trades",
            report.outcome, report.final_value, report.total_trades
        );
        Ok(report)
    }
}
