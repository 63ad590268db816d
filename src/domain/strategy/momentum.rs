//! Lookback-return momentum: long when trailing return turns positive.

use crate::domain::error::QuantbtError;
use crate::domain::ohlcv::PriceSeries;
use crate::domain::signal::{Signal, SignalPoint, SignalSeries};

use super::{validate_allocate, validate_positive, Strategy};

const NAME: &str = "momentum";

#[derive(Debug, Clone)]
pub struct Momentum {
    lookback: usize,
    allocate: f64,
}

impl Momentum {
    pub fn new(lookback: i64, allocate: f64) -> Result<Self, QuantbtError> {
        let lookback = validate_positive(NAME, "lookback", lookback)?;
        validate_allocate(NAME, allocate)?;
        Ok(Self { lookback, allocate })
    }

    /// Trailing return at `index`, None before the lookback is filled or when
    /// the reference close is zero.
    fn momentum_at(&self, closes: &[f64], index: usize) -> Option<f64> {
        if index < self.lookback {
            return None;
        }
        let reference = closes[index - self.lookback];
        if reference == 0.0 {
            return None;
        }
        Some((closes[index] - reference) / reference)
    }
}

impl Strategy for Momentum {
    fn name(&self) -> &'static str {
        NAME
    }

    fn allocate(&self) -> f64 {
        self.allocate
    }

    fn generate_signals(&self, series: &PriceSeries) -> SignalSeries {
        let bars = series.bars();
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();

        let points = bars
            .iter()
            .enumerate()
            .map(|(i, bar)| {
                let signal = match self.momentum_at(&closes, i) {
                    Some(m) => {
                        // An undefined previous momentum counts as zero, so
                        // the first defined bar of a trend can fire.
                        let prev = (i > 0)
                            .then(|| self.momentum_at(&closes, i - 1))
                            .flatten()
                            .unwrap_or(0.0);
                        if m > 0.0 && prev <= 0.0 {
                            Signal::Buy
                        } else if m < 0.0 && prev >= 0.0 {
                            Signal::Sell
                        } else {
                            Signal::Hold
                        }
                    }
                    None => Signal::Hold,
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
