//! Buy on the first bar, hold forever.

use crate::domain::error::QuantbtError;
use crate::domain::ohlcv::PriceSeries;
use crate::domain::signal::{Signal, SignalPoint, SignalSeries};

use super::{validate_allocate, Strategy};

const NAME: &str = "buy_and_hold";

#[derive(Debug, Clone)]
pub struct BuyAndHold {
    allocate: f64,
}

impl BuyAndHold {
    pub fn new(allocate: f64) -> Result<Self, QuantbtError> {
        validate_allocate(NAME, allocate)?;
        Ok(Self { allocate })
    }
}

impl Strategy for BuyAndHold {
    fn name(&self) -> &'static str {
        NAME
    }

    fn allocate(&self) -> f64 {
        self.allocate
    }

    fn generate_signals(&self, series: &PriceSeries) -> SignalSeries {
        let points = series
            .bars()
            .iter()
            .enumerate()
            .map(|(i, bar)| SignalPoint {
                date: bar.date,
                signal: if i == 0 { Signal::Buy } else { Signal::Hold },
            })
            .collect();
        SignalSeries::from_points(points)
    }
}
