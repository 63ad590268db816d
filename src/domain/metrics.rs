//! Performance statistics over an equity curve.

use super::backtest::EquityPoint;

/// Trading periods per year used for annualization. Daily bars assumed; the
/// constant is a config default, not derived from actual date spacing.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

#[derive(Debug, Clone)]
pub struct MetricsConfig {
    pub periods_per_year: f64,
    pub risk_free_rate: f64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        MetricsConfig {
            periods_per_year: TRADING_DAYS_PER_YEAR,
            risk_free_rate: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceStats {
    pub total_return: f64,
    pub annualized_volatility: f64,
    pub sharpe_ratio: f64,
    pub max_drawdown: f64,
}

impl PerformanceStats {
    pub fn zero() -> Self {
        PerformanceStats {
            total_return: 0.0,
            annualized_volatility: 0.0,
            sharpe_ratio: 0.0,
            max_drawdown: 0.0,
        }
    }

    /// Reduce an equity curve to summary statistics. Pure; curves shorter
    /// than two points are the defined degenerate case and yield all zeros.
    pub fn compute(equity_curve: &[EquityPoint], config: &MetricsConfig) -> Self {
        if equity_curve.len() < 2 {
            return Self::zero();
        }

        let returns: Vec<f64> = equity_curve
            .windows(2)
            .map(|w| {
                let prev = w[0].equity;
                if prev != 0.0 {
                    w[1].equity / prev - 1.0
                } else {
                    0.0
                }
            })
            .collect();

        let first = equity_curve[0].equity;
        let last = equity_curve[equity_curve.len() - 1].equity;
        let total_return = if first != 0.0 { last / first - 1.0 } else { 0.0 };

        let n = returns.len() as f64;
        let mean = returns.iter().sum::<f64>() / n;

        // Sample standard deviation (ddof = 1); a single return has no
        // spread and annualizes to zero rather than NaN.
        let annualized_volatility = if returns.len() > 1 {
            let variance =
                returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);
            variance.sqrt() * config.periods_per_year.sqrt()
        } else {
            0.0
        };

        let sharpe_ratio = if annualized_volatility > 0.0 {
            let excess = mean - config.risk_free_rate / config.periods_per_year;
            excess * config.periods_per_year / annualized_volatility
        } else {
            0.0
        };

        let mut running_max = first;
        let mut max_drawdown = 0.0_f64;
        for point in equity_curve {
            if point.equity > running_max {
                running_max = point.equity;
            }
            if running_max > 0.0 {
                let drawdown = (point.equity - running_max) / running_max;
                if drawdown < max_drawdown {
                    max_drawdown = drawdown;
                }
            }
        }

        PerformanceStats {
            total_return,
            annualized_volatility,
            sharpe_ratio,
            max_drawdown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn make_curve(values: &[f64]) -> Vec<EquityPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, &equity)| EquityPoint {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                    + chrono::Duration::days(i as i64),
                equity,
                shares: 0,
            })
            .collect()
    }

    #[test]
    fn degenerate_curves_are_all_zero() {
        let empty = PerformanceStats::compute(&make_curve(&[]), &MetricsConfig::default());
        assert_eq!(empty, PerformanceStats::zero());

        let single =
            PerformanceStats::compute(&make_curve(&[100_000.0]), &MetricsConfig::default());
        assert_eq!(single, PerformanceStats::zero());
    }

    #[test]
    fn total_return_up_and_down() {
        let up = PerformanceStats::compute(
            &make_curve(&[100_000.0, 105_000.0, 110_000.0]),
            &MetricsConfig::default(),
        );
        assert_relative_eq!(up.total_return, 0.10, max_relative = 1e-12);

        let down = PerformanceStats::compute(
            &make_curve(&[100_000.0, 95_000.0, 90_000.0]),
            &MetricsConfig::default(),
        );
        assert_relative_eq!(down.total_return, -0.10, max_relative = 1e-12);
    }

    #[test]
    fn flat_curve_has_zero_everything() {
        let stats = PerformanceStats::compute(
            &make_curve(&[100.0, 100.0, 100.0, 100.0]),
            &MetricsConfig::default(),
        );
        assert_eq!(stats, PerformanceStats::zero());
    }

    #[test]
    fn volatility_annualizes_sample_stddev() {
        // Returns: +10%, -10%; mean 0, sample variance = 2 * 0.01 / 1 = 0.02.
        let stats = PerformanceStats::compute(
            &make_curve(&[100.0, 110.0, 99.0]),
            &MetricsConfig::default(),
        );
        let expected = (0.02_f64).sqrt() * TRADING_DAYS_PER_YEAR.sqrt();
        assert_relative_eq!(stats.annualized_volatility, expected, max_relative = 1e-9);
    }

    #[test]
    fn two_point_curve_has_zero_volatility_not_nan() {
        let stats = PerformanceStats::compute(
            &make_curve(&[100.0, 110.0]),
            &MetricsConfig::default(),
        );
        assert!((stats.total_return - 0.10).abs() < 1e-12);
        assert_eq!(stats.annualized_volatility, 0.0);
        assert_eq!(stats.sharpe_ratio, 0.0);
        assert!(stats.annualized_volatility.is_finite());
    }

    #[test]
    fn sharpe_is_mean_over_vol() {
        let curve = make_curve(&[100.0, 102.0, 103.0, 105.0, 104.0]);
        let stats = PerformanceStats::compute(&curve, &MetricsConfig::default());

        let returns = [0.02, 1.0 / 102.0, 2.0 / 103.0, -1.0 / 105.0];
        let mean = returns.iter().sum::<f64>() / 4.0;
        let var = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / 3.0;
        let vol = var.sqrt() * TRADING_DAYS_PER_YEAR.sqrt();
        let expected = mean * TRADING_DAYS_PER_YEAR / vol;

        assert_relative_eq!(stats.sharpe_ratio, expected, max_relative = 1e-9);
    }

    #[test]
    fn risk_free_rate_lowers_sharpe() {
        let curve = make_curve(&[100.0, 101.0, 102.5, 103.0, 104.5]);
        let zero_rf = PerformanceStats::compute(&curve, &MetricsConfig::default());
        let with_rf = PerformanceStats::compute(
            &curve,
            &MetricsConfig {
                risk_free_rate: 0.05,
                ..MetricsConfig::default()
            },
        );
        assert!(with_rf.sharpe_ratio < zero_rf.sharpe_ratio);
    }

    #[test]
    fn max_drawdown_is_worst_peak_to_trough() {
        // Peak 110, trough 80: drawdown = (80 - 110) / 110.
        let stats = PerformanceStats::compute(
            &make_curve(&[100.0, 110.0, 90.0, 95.0, 80.0, 100.0]),
            &MetricsConfig::default(),
        );
        assert_relative_eq!(
            stats.max_drawdown,
            (80.0 - 110.0) / 110.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn drawdown_zero_iff_non_decreasing() {
        let rising = PerformanceStats::compute(
            &make_curve(&[100.0, 100.0, 105.0, 110.0]),
            &MetricsConfig::default(),
        );
        assert_eq!(rising.max_drawdown, 0.0);

        let dipping = PerformanceStats::compute(
            &make_curve(&[100.0, 105.0, 104.9, 110.0]),
            &MetricsConfig::default(),
        );
        assert!(dipping.max_drawdown < 0.0);
    }

    #[test]
    fn drawdown_never_positive() {
        let stats = PerformanceStats::compute(
            &make_curve(&[100.0, 120.0, 110.0, 130.0, 90.0, 140.0]),
            &MetricsConfig::default(),
        );
        assert!(stats.max_drawdown <= 0.0);
    }

    #[test]
    fn stats_are_always_finite() {
        let curves: &[&[f64]] = &[
            &[100.0, 0.0, 50.0],
            &[0.0, 0.0],
            &[100.0, 100.0],
            &[1e-9, 1e9],
        ];
        for values in curves {
            let stats = PerformanceStats::compute(&make_curve(values), &MetricsConfig::default());
            assert!(stats.total_return.is_finite());
            assert!(stats.annualized_volatility.is_finite());
            assert!(stats.sharpe_ratio.is_finite());
            assert!(stats.max_drawdown.is_finite());
        }
    }
}
