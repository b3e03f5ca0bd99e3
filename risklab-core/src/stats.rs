//! Statistical helpers — pure functions over return/P&L series.
//!
//! Every function is total: degenerate inputs (empty series, zero variance)
//! return 0.0 rather than NaN, so downstream reports never carry non-finite
//! values.

/// Arithmetic mean. 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator). 0.0 below 2 samples.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

/// Sharpe-like ratio: mean / sample stdev of per-trade returns.
///
/// Not annualized. 0.0 with fewer than 2 samples or zero variance.
pub fn sharpe_ratio(returns: &[f64]) -> f64 {
    if returns.len() < 2 {
        return 0.0;
    }
    let std = std_dev(returns);
    if std < 1e-15 {
        return 0.0;
    }
    mean(returns) / std
}

/// Winning fraction as a percentage. 0.0 when `total` is zero.
pub fn win_rate_pct(winners: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    winners as f64 / total as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn mean_basic() {
        assert!((mean(&[10.0, -5.0]) - 2.5).abs() < 1e-10);
    }

    #[test]
    fn std_dev_below_two_samples_is_zero() {
        assert_eq!(std_dev(&[]), 0.0);
        assert_eq!(std_dev(&[3.0]), 0.0);
    }

    #[test]
    fn std_dev_known_value() {
        // [10, -5]: mean 2.5, sample variance (7.5^2 + 7.5^2) / 1 = 112.5
        let expected = 112.5_f64.sqrt();
        assert!((std_dev(&[10.0, -5.0]) - expected).abs() < 1e-10);
    }

    #[test]
    fn sharpe_known_value() {
        let expected = 2.5 / 112.5_f64.sqrt();
        assert!((sharpe_ratio(&[10.0, -5.0]) - expected).abs() < 1e-10);
    }

    #[test]
    fn sharpe_zero_variance_is_zero() {
        assert_eq!(sharpe_ratio(&[1.0, 1.0, 1.0]), 0.0);
    }

    #[test]
    fn sharpe_single_sample_is_zero() {
        assert_eq!(sharpe_ratio(&[10.0]), 0.0);
    }

    #[test]
    fn win_rate_handles_zero_total() {
        assert_eq!(win_rate_pct(0, 0), 0.0);
        assert!((win_rate_pct(1, 2) - 50.0).abs() < 1e-10);
    }
}
