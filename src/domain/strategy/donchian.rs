//! Donchian channel breakout with a tolerance-widened trigger.

use crate::domain::error::QuantbtError;
use crate::domain::indicator::{rolling_max_high, rolling_min_low};
use crate::domain::ohlcv::PriceSeries;
use crate::domain::signal::{Signal, SignalPoint, SignalSeries};

use super::{validate_allocate, validate_positive, Strategy};

const NAME: &str = "donchian";

#[derive(Debug, Clone)]
pub struct DonchianChannel {
    window: usize,
    tolerance: f64,
    allocate: f64,
}

impl DonchianChannel {
    pub fn new(window: i64, tolerance: f64, allocate: f64) -> Result<Self, QuantbtError> {
        let window = validate_positive(NAME, "window", window)?;
        if tolerance < 0.0 {
            return Err(QuantbtError::InvalidParameter {
                strategy: NAME,
                param: "tolerance",
                reason: format!("must be non-negative, got {tolerance}"),
            });
        }
        validate_allocate(NAME, allocate)?;
        Ok(Self {
            window,
            tolerance,
            allocate,
        })
    }
}

impl Strategy for DonchianChannel {
    fn name(&self) -> &'static str {
        NAME
    }

    fn allocate(&self) -> f64 {
        self.allocate
    }

    fn generate_signals(&self, series: &PriceSeries) -> SignalSeries {
        let bars = series.bars();
        let upper = rolling_max_high(bars, self.window);
        let lower = rolling_min_low(bars, self.window);

        // Breakout test against the tolerance-widened channel edge;
        // edge-triggered so a persisting breakout signals only once.
        let breakout_up = |i: usize| -> Option<bool> {
            upper.get(i).map(|u| bars[i].close > u * (1.0 - self.tolerance))
        };
        let breakout_down = |i: usize| -> Option<bool> {
            lower.get(i).map(|l| bars[i].close < l * (1.0 + self.tolerance))
        };

        let points = bars
            .iter()
            .enumerate()
            .map(|(i, bar)| {
                let signal = if i == 0 {
                    Signal::Hold
                } else {
                    match (
                        breakout_up(i),
                        breakout_up(i - 1),
                        breakout_down(i),
                        breakout_down(i - 1),
                    ) {
                        (Some(up), Some(prev_up), Some(down), Some(prev_down)) => {
                            if up && !prev_up {
                                Signal::Buy
                            } else if down && !prev_down {
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
