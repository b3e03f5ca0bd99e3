//! Strategy contract — the caller-supplied decision function.
//!
//! Strategies are pure with respect to engine state: they see a market
//! sample and a portfolio summary and return signals. They may keep their
//! own internal state (indicator windows, cooldowns).

use anyhow::Result;
use risklab_core::domain::{MarketSample, Signal};
use risklab_core::PortfolioSummary;

/// One strategy driving one backtest run.
pub trait Strategy {
    /// Decide on this sample. An `Err` aborts the run; the runner finalizes
    /// the report with everything collected so far before surfacing it.
    fn on_sample(
        &mut self,
        sample: &MarketSample,
        summary: &PortfolioSummary,
    ) -> Result<Vec<Signal>>;

    /// Attribution tag stamped onto trades this strategy opens.
    fn name(&self) -> &str {
        "unnamed"
    }
}

/// Closures are strategies.
impl<F> Strategy for F
where
    F: FnMut(&MarketSample, &PortfolioSummary) -> Result<Vec<Signal>>,
{
    fn on_sample(
        &mut self,
        sample: &MarketSample,
        summary: &PortfolioSummary,
    ) -> Result<Vec<Signal>> {
        self(sample, summary)
    }
}

/// Moving-average crossover on a single symbol.
///
/// Buys when the short MA rises above the long MA and no position is open;
/// sells when it falls below while one is. The portfolio summary is the
/// source of truth for "in position" so a validator rejection cannot
/// desynchronize the strategy.
#[derive(Debug, Clone)]
pub struct MaCrossStrategy {
    symbol: String,
    short_period: usize,
    long_period: usize,
    size: f64,
    closes: Vec<f64>,
}

impl MaCrossStrategy {
    pub fn new(symbol: impl Into<String>, short_period: usize, long_period: usize, size: f64) -> Self {
        Self {
            symbol: symbol.into(),
            short_period,
            long_period,
            size,
            closes: Vec::new(),
        }
    }

    fn ma(&self, period: usize) -> Option<f64> {
        if self.closes.len() < period || period == 0 {
            return None;
        }
        let window = &self.closes[self.closes.len() - period..];
        Some(window.iter().sum::<f64>() / period as f64)
    }
}

impl Strategy for MaCrossStrategy {
    fn on_sample(
        &mut self,
        sample: &MarketSample,
        summary: &PortfolioSummary,
    ) -> Result<Vec<Signal>> {
        let Some(price) = sample.price(&self.symbol) else {
            return Ok(Vec::new());
        };
        self.closes.push(price);

        let (Some(short), Some(long)) = (self.ma(self.short_period), self.ma(self.long_period))
        else {
            return Ok(Vec::new());
        };

        let in_position = summary.open_trades > 0;
        if short > long && !in_position {
            Ok(vec![Signal::buy(self.symbol.clone(), self.size, 0.6)])
        } else if short < long && in_position {
            Ok(vec![Signal::sell(self.symbol.clone())])
        } else {
            Ok(vec![Signal::hold(self.symbol.clone())])
        }
    }

    fn name(&self) -> &str {
        "ma_cross"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use risklab_core::domain::SignalAction;
    use risklab_core::{Ledger, PortfolioValuator};

    fn summary(open_trades: usize) -> PortfolioSummary {
        let ledger = Ledger::new(10_000.0);
        let valuator = PortfolioValuator::new(10_000.0);
        let mut s = valuator.summary(ledger.portfolio());
        s.open_trades = open_trades;
        s
    }

    fn sample(i: usize, price: f64) -> MarketSample {
        let ts = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap()
            + chrono::Duration::hours(i as i64);
        MarketSample::new(ts).with_price("SPY", price)
    }

    #[test]
    fn warms_up_silently_then_signals() {
        let mut strategy = MaCrossStrategy::new("SPY", 2, 4, 1.0);

        // Falling then rising prices: short MA crosses above long MA
        let prices = [100.0, 98.0, 96.0, 99.0, 104.0];
        let mut last = Vec::new();
        for (i, &p) in prices.iter().enumerate() {
            last = strategy.on_sample(&sample(i, p), &summary(0)).unwrap();
        }
        assert_eq!(last.len(), 1);
        assert_eq!(last[0].action, SignalAction::Buy);
    }

    #[test]
    fn sells_on_cross_down_only_when_in_position() {
        let mut strategy = MaCrossStrategy::new("SPY", 2, 4, 1.0);
        let prices = [100.0, 103.0, 106.0, 103.0, 97.0];
        let mut last = Vec::new();
        for (i, &p) in prices.iter().enumerate() {
            last = strategy.on_sample(&sample(i, p), &summary(1)).unwrap();
        }
        assert_eq!(last[0].action, SignalAction::Sell);
    }

    #[test]
    fn missing_symbol_yields_no_signals() {
        let mut strategy = MaCrossStrategy::new("SPY", 2, 4, 1.0);
        let ts = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        let empty = MarketSample::new(ts);
        assert!(strategy.on_sample(&empty, &summary(0)).unwrap().is_empty());
    }

    #[test]
    fn closures_are_strategies() {
        let mut counter = 0usize;
        let mut strategy =
            |_: &MarketSample, _: &PortfolioSummary| -> Result<Vec<Signal>> {
                counter += 1;
                Ok(Vec::new())
            };
        let s = summary(0);
        Strategy::on_sample(&mut strategy, &sample(0, 100.0), &s).unwrap();
        assert_eq!(Strategy::name(&strategy), "unnamed");
        assert_eq!(counter, 1);
    }
}
