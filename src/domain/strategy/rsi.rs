//! RSI mean-reversion: buy oversold entries, sell overbought exits.

use crate::domain::error::QuantbtError;
use crate::domain::indicator::rsi;
use crate::domain::ohlcv::PriceSeries;
use crate::domain::signal::{Signal, SignalPoint, SignalSeries};

use super::{validate_allocate, validate_positive, Strategy};

const NAME: &str = "rsi";

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    lower: f64,
    upper: f64,
    allocate: f64,
}

impl Rsi {
    pub fn new(period: i64, lower: f64, upper: f64, allocate: f64) -> Result<Self, QuantbtError> {
        let period = validate_positive(NAME, "period", period)?;
        if lower >= upper {
            return Err(QuantbtError::InvalidParameter {
                strategy: NAME,
                param: "lower",
                reason: format!("must be less than upper ({lower} >= {upper})"),
            });
        }
        validate_allocate(NAME, allocate)?;
        Ok(Self {
            period,
            lower,
            upper,
            allocate,
        })
    }
}

impl Strategy for Rsi {
    fn name(&self) -> &'static str {
        NAME
    }

    fn allocate(&self) -> f64 {
        self.allocate
    }

    fn generate_signals(&self, series: &PriceSeries) -> SignalSeries {
        let bars = series.bars();
        let oscillator = rsi(bars, self.period);

        let points = bars
            .iter()
            .enumerate()
            .map(|(i, bar)| {
                let signal = if i == 0 {
                    Signal::Hold
                } else {
                    match (oscillator.get(i), oscillator.get(i - 1)) {
                        (Some(value), Some(prev)) => {
                            if value < self.lower && prev >= self.lower {
                                Signal::Buy
                            } else if value > self.upper && prev <= self.upper {
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
