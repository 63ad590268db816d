//! Fast/slow moving average crossover.
//!
//! Buy on the golden cross (fast crosses from <= slow to > slow), Sell on the
//! death cross. Bars where either average is still warming up never signal,
//! and a cross needs both the current and previous bar's averages defined.

use crate::domain::error::QuantbtError;
use crate::domain::indicator::sma;
use crate::domain::ohlcv::PriceSeries;
use crate::domain::signal::{Signal, SignalPoint, SignalSeries};

use super::{validate_allocate, validate_positive, Strategy};

const NAME: &str = "sma_crossover";

#[derive(Debug, Clone)]
pub struct SmaCrossover {
    fast: usize,
    slow: usize,
    allocate: f64,
}

impl SmaCrossover {
    pub fn new(fast: i64, slow: i64, allocate: f64) -> Result<Self, QuantbtError> {
        let fast = validate_positive(NAME, "fast", fast)?;
        let slow = validate_positive(NAME, "slow", slow)?;
        if fast >= slow {
            return Err(QuantbtError::InvalidParameter {
                strategy: NAME,
                param: "fast",
                reason: format!("must be less than slow ({fast} >= {slow})"),
            });
        }
        validate_allocate(NAME, allocate)?;
        Ok(Self {
            fast,
            slow,
            allocate,
        })
    }
}

impl Strategy for SmaCrossover {
    fn name(&self) -> &'static str {
        NAME
    }

    fn allocate(&self) -> f64 {
        self.allocate
    }

    fn generate_signals(&self, series: &PriceSeries) -> SignalSeries {
        let bars = series.bars();
        let fast_ma = sma(bars, self.fast);
        let slow_ma = sma(bars, self.slow);

        let points = bars
            .iter()
            .enumerate()
            .map(|(i, bar)| {
                let signal = if i == 0 {
                    Signal::Hold
                } else {
                    match (
                        fast_ma.get(i),
                        slow_ma.get(i),
                        fast_ma.get(i - 1),
                        slow_ma.get(i - 1),
                    ) {
                        (Some(fast), Some(slow), Some(prev_fast), Some(prev_slow)) => {
                            if fast > slow && prev_fast <= prev_slow {
                                Signal::Buy
                            } else if fast < slow && prev_fast >= prev_slow {
                                Signal::Sell
                            } else {
                                Signal::Hold
                            }
                        }
                        _ => Signal::Hold,
                    }
                };
                SignalPoint {
                    date: bar.date,
                    signal,
                }
            })
            .collect();
        SignalSeries::from_points(points)
    }
}
