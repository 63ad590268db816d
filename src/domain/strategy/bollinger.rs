//! Bollinger band mean-reversion.
//!
//! middle = rolling mean, bands = middle +/- num_std * rolling stddev.
//! Buy when the close crosses down onto or through the lower band, Sell when
//! it crosses up onto or through the upper band.

use crate::domain::error::QuantbtError;
use crate::domain::indicator::{rolling_stddev, sma, IndicatorSeries};
use crate::domain::ohlcv::PriceSeries;
use crate::domain::signal::{Signal, SignalPoint, SignalSeries};

use super::{validate_allocate, validate_positive, Strategy};

const NAME: &str = "bollinger";

#[derive(Debug, Clone)]
pub struct BollingerBands {
    window: usize,
    num_std: f64,
    allocate: f64,
}

impl BollingerBands {
    pub fn new(window: i64, num_std: f64, allocate: f64) -> Result<Self, QuantbtError> {
        let window = validate_positive(NAME, "window", window)?;
        if num_std <= 0.0 {
            return Err(QuantbtError::InvalidParameter {
                strategy: NAME,
                param: "num_std",
                reason: format!("must be positive, got {num_std}"),
            });
        }
        validate_allocate(NAME, allocate)?;
        Ok(Self {
            window,
            num_std,
            allocate,
        })
    }

    fn bands_at(
        &self,
        middle: &IndicatorSeries,
        stddev: &IndicatorSeries,
        index: usize,
    ) -> Option<(f64, f64)> {
        let m = middle.get(index)?;
        let sd = stddev.get(index)?;
        let band = self.num_std * sd;
        Some((m - band, m + band))
    }
}

impl Strategy for BollingerBands {
    fn name(&self) -> &'static str {
        NAME
    }

    fn allocate(&self) -> f64 {
        self.allocate
    }

    fn generate_signals(&self, series: &PriceSeries) -> SignalSeries {
        let bars = series.bars();
        let middle = sma(bars, self.window);
        let stddev = rolling_stddev(bars, self.window);

        let points = bars
            .iter()
            .enumerate()
            .map(|(i, bar)| {
                let signal = if i == 0 {
                    Signal::Hold
                } else {
                    match (
                        self.bands_at(&middle, &stddev, i),
                        self.bands_at(&middle, &stddev, i - 1),
                    ) {
                        (Some((lower, upper)), Some((prev_lower, prev_upper))) => {
                            let prev_close = bars[i - 1].close;
                            if bar.close <= lower && prev_close > prev_lower {
                                Signal::Buy
                            } else if bar.close >= upper && prev_close < prev_upper {
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
