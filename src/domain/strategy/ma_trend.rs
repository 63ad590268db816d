//! Long-window trend filter (the classic 200-day moving average rule).
//!
//! A symmetric buffer around the trend line suppresses whipsaw: buys trigger
//! above trend + buffer, sells below trend - buffer.

use crate::domain::error::QuantbtError;
use crate::domain::indicator::sma;
use crate::domain::ohlcv::PriceSeries;
use crate::domain::signal::{Signal, SignalPoint, SignalSeries};

use super::{validate_allocate, validate_positive, Strategy};

const NAME: &str = "ma_trend";

#[derive(Debug, Clone)]
pub struct MaTrend {
    window: usize,
    buffer_pct: f64,
    allocate: f64,
}

impl MaTrend {
    pub fn new(window: i64, buffer_pct: f64, allocate: f64) -> Result<Self, QuantbtError> {
        let window = validate_positive(NAME, "window", window)?;
        if !(0.0..=1.0).contains(&buffer_pct) {
            return Err(QuantbtError::InvalidParameter {
                strategy: NAME,
                param: "buffer_pct",
                reason: format!("must be between 0 and 1, got {buffer_pct}"),
            });
        }
        validate_allocate(NAME, allocate)?;
        Ok(Self {
            window,
            buffer_pct,
            allocate,
        })
    }
}

impl Strategy for MaTrend {
    fn name(&self) -> &'static str {
        NAME
    }

    fn allocate(&self) -> f64 {
        self.allocate
    }

    fn generate_signals(&self, series: &PriceSeries) -> SignalSeries {
        let bars = series.bars();
        let trend = sma(bars, self.window);

        let points = bars
            .iter()
            .enumerate()
            .map(|(i, bar)| {
                let signal = if i == 0 {
                    Signal::Hold
                } else {
                    match (trend.get(i), trend.get(i - 1)) {
                        (Some(line), Some(prev_line)) => {
                            let buffer = line * self.buffer_pct;
                            let prev_buffer = prev_line * self.buffer_pct;
                            let prev_close = bars[i - 1].close;
                            if bar.close > line + buffer && prev_close <= prev_line + prev_buffer {
                                Signal::Buy
                            } else if bar.close < line - buffer
                                && prev_close >= prev_line - prev_buffer
                            {
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
