//! Risk alerting — stateless threshold detector.
//!
//! Run after each valuation update. Emits, never stores: delivery is the
//! notification collaborator's job. Warnings fire at 80% of a limit so the
//! consumer can act before a hard breach.

use crate::risk::params::RiskParameters;
use crate::valuation::PortfolioSummary;
use serde::{Deserialize, Serialize};

/// Fraction of a limit at which a warning (rather than a breach) fires.
const WARN_FRACTION: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertKind {
    DailyLoss,
    Drawdown,
    Exposure,
}

/// One threshold event. Serializable for the notification sink.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub severity: AlertSeverity,
    pub message: String,
    pub metric_value: f64,
    pub threshold: f64,
}

/// Compare the summary against each limit; zero, one, or several alerts.
pub fn check_thresholds(summary: &PortfolioSummary, params: &RiskParameters) -> Vec<Alert> {
    let mut alerts = Vec::new();

    // Daily loss (only losses alert; gains never do)
    let daily_loss = (-summary.daily_pnl).max(0.0);
    let loss_limit = summary.initial_capital * params.max_daily_loss_pct / 100.0;
    if loss_limit > 0.0 {
        if daily_loss >= loss_limit {
            alerts.push(Alert {
                kind: AlertKind::DailyLoss,
                severity: AlertSeverity::High,
                message: format!("daily loss {daily_loss:.2} breached limit {loss_limit:.2}"),
                metric_value: daily_loss,
                threshold: loss_limit,
            });
        } else if daily_loss >= loss_limit * WARN_FRACTION {
            alerts.push(Alert {
                kind: AlertKind::DailyLoss,
                severity: AlertSeverity::Medium,
                message: format!(
                    "daily loss {daily_loss:.2} approaching limit {loss_limit:.2}"
                ),
                metric_value: daily_loss,
                threshold: loss_limit,
            });
        }
    }

    // Drawdown
    let dd = summary.current_drawdown_pct;
    let dd_limit = params.max_portfolio_drawdown_pct;
    if dd_limit > 0.0 {
        if dd >= dd_limit {
            alerts.push(Alert {
                kind: AlertKind::Drawdown,
                severity: AlertSeverity::High,
                message: format!("drawdown {dd:.1}% breached limit {dd_limit:.1}%"),
                metric_value: dd,
                threshold: dd_limit,
            });
        } else if dd >= dd_limit * WARN_FRACTION {
            alerts.push(Alert {
                kind: AlertKind::Drawdown,
                severity: AlertSeverity::Medium,
                message: format!("drawdown {dd:.1}% approaching limit {dd_limit:.1}%"),
                metric_value: dd,
                threshold: dd_limit,
            });
        }
    }

    // Total exposure
    if summary.total_value > 0.0 && params.max_total_exposure_pct > 0.0 {
        let exposure = summary.positions_value / summary.total_value * 100.0;
        let limit = params.max_total_exposure_pct;
        if exposure >= limit {
            alerts.push(Alert {
                kind: AlertKind::Exposure,
                severity: AlertSeverity::Medium,
                message: format!("exposure {exposure:.1}% breached limit {limit:.1}%"),
                metric_value: exposure,
                threshold: limit,
            });
        } else if exposure >= limit * WARN_FRACTION {
            alerts.push(Alert {
                kind: AlertKind::Exposure,
                severity: AlertSeverity::Low,
                message: format!("exposure {exposure:.1}% approaching limit {limit:.1}%"),
                metric_value: exposure,
                threshold: limit,
            });
        }
    }

    alerts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> PortfolioSummary {
        PortfolioSummary {
            total_value: 10_000.0,
            cash: 10_000.0,
            positions_value: 0.0,
            initial_capital: 10_000.0,
            total_pnl: 0.0,
            total_pnl_pct: 0.0,
            open_trades: 0,
            closed_trades: 0,
            win_rate: 0.0,
            sharpe_ratio: 0.0,
            daily_pnl: 0.0,
            current_drawdown_pct: 0.0,
            max_drawdown_pct: 0.0,
        }
    }

    #[test]
    fn healthy_portfolio_emits_nothing() {
        assert!(check_thresholds(&summary(), &RiskParameters::default()).is_empty());
    }

    #[test]
    fn daily_loss_warning_at_80_pct() {
        let mut s = summary();
        s.daily_pnl = -400.0; // limit is 500, warn at 400
        let alerts = check_thresholds(&s, &RiskParameters::default());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, AlertKind::DailyLoss);
        assert_eq!(alerts[0].severity, AlertSeverity::Medium);
        assert_eq!(alerts[0].threshold, 500.0);
    }

    #[test]
    fn daily_loss_breach_is_high_severity() {
        let mut s = summary();
        s.daily_pnl = -600.0;
        let alerts = check_thresholds(&s, &RiskParameters::default());
        assert_eq!(alerts[0].severity, AlertSeverity::High);
    }

    #[test]
    fn daily_gain_never_alerts() {
        let mut s = summary();
        s.daily_pnl = 1_000.0;
        assert!(check_thresholds(&s, &RiskParameters::default()).is_empty());
    }

    #[test]
    fn drawdown_warning_then_breach() {
        let mut s = summary();
        s.current_drawdown_pct = 16.0; // limit 20, warn at 16
        let alerts = check_thresholds(&s, &RiskParameters::default());
        assert_eq!(alerts[0].kind, AlertKind::Drawdown);
        assert_eq!(alerts[0].severity, AlertSeverity::Medium);

        s.current_drawdown_pct = 21.0;
        let alerts = check_thresholds(&s, &RiskParameters::default());
        assert_eq!(alerts[0].severity, AlertSeverity::High);
    }

    #[test]
    fn exposure_alerts_scale_with_positions_value() {
        let mut s = summary();
        s.positions_value = 8_500.0; // 85% vs 80% limit
        let alerts = check_thresholds(&s, &RiskParameters::default());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, AlertKind::Exposure);
        assert_eq!(alerts[0].severity, AlertSeverity::Medium);
    }

    #[test]
    fn multiple_alerts_emitted_together() {
        let mut s = summary();
        s.daily_pnl = -600.0;
        s.current_drawdown_pct = 25.0;
        s.positions_value = 9_000.0;
        let alerts = check_thresholds(&s, &RiskParameters::default());
        assert_eq!(alerts.len(), 3);
    }

    #[test]
    fn alert_serialization_roundtrip() {
        let mut s = summary();
        s.daily_pnl = -600.0;
        let alerts = check_thresholds(&s, &RiskParameters::default());
        let json = serde_json::to_string(&alerts).unwrap();
        let deser: Vec<Alert> = serde_json::from_str(&json).unwrap();
        assert_eq!(deser[0].kind, AlertKind::DailyLoss);
    }
}
