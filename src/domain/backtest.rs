//! Simulation engine: replays a price/signal pair into an equity trajectory.
//!
//! Single chronological pass, one iteration per bar. A bar's signal executes
//! at that same bar's close. This mirrors the behavior the metrics are
//! calibrated against; it is optimistic versus next-bar-open execution and is
//! kept deliberately.

use chrono::NaiveDate;

use super::error::QuantbtError;
use super::ohlcv::PriceSeries;
use super::signal::{Signal, SignalSeries};
use super::strategy::Strategy;

#[derive(Debug, Clone)]
pub struct BacktestConfig {
    pub initial_capital: f64,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        BacktestConfig {
            initial_capital: 100_000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub equity: f64,
    pub shares: i64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionPoint {
    pub date: NaiveDate,
    pub shares: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestResult {
    pub equity_curve: Vec<EquityPoint>,
    pub position_curve: Vec<PositionPoint>,
}

/// Generate signals for `strategy` and simulate them over `series`.
pub fn run_backtest(
    series: &PriceSeries,
    strategy: &dyn Strategy,
    config: &BacktestConfig,
) -> Result<BacktestResult, QuantbtError> {
    let signals = strategy.generate_signals(series);
    simulate(series, &signals, strategy.allocate(), config.initial_capital)
}

/// Replay a signal series over its price series.
///
/// State per bar: cash and a whole-share position. Buys commit
/// `floor(cash * allocate / close)` shares; sells liquidate the full
/// position. Every bar records equity and shares, so the output curves have
/// one point per input bar with no gaps.
pub fn simulate(
    series: &PriceSeries,
    signals: &SignalSeries,
    allocate: f64,
    initial_cash: f64,
) -> Result<BacktestResult, QuantbtError> {
    if signals.len() != series.len() {
        return Err(QuantbtError::SignalMismatch {
            expected: series.len(),
            got: signals.len(),
        });
    }

    let mut cash = initial_cash;
    let mut shares: i64 = 0;
    let mut equity_curve = Vec::with_capacity(series.len());
    let mut position_curve = Vec::with_capacity(series.len());

    for (bar, point) in series.bars().iter().zip(signals.points()) {
        let price = bar.close;

        match point.signal {
            Signal::Buy if cash > 0.0 && price > 0.0 => {
                let shares_to_buy = (cash * allocate / price).floor() as i64;
                if shares_to_buy > 0 {
                    shares += shares_to_buy;
                    cash -= shares_to_buy as f64 * price;
                }
            }
            Signal::Sell if shares > 0 => {
                cash += shares as f64 * price;
                shares = 0;
            }
            _ => {}
        }

        equity_curve.push(EquityPoint {
            date: bar.date,
            equity: cash + shares as f64 * price,
            shares,
        });
        position_curve.push(PositionPoint {
            date: bar.date,
            shares,
        });
    }

    Ok(BacktestResult {
        equity_curve,
        position_curve,
    })
}
