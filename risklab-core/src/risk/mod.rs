//! Risk framework — parameters, trade validation, and threshold alerting.

pub mod alerts;
pub mod params;
pub mod validator;

pub use alerts::{check_thresholds, Alert, AlertKind, AlertSeverity};
pub use params::RiskParameters;
pub use validator::{validate, Rejection, RiskCheck, TradeIntent, ValidationResult};
