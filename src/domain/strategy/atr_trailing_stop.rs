//! ATR trailing stop: a two-state machine folded over the bars.
//!
//! Flat -> Long when the close clears its 20-bar mean (fixed entry filter);
//! Long -> Flat when the close falls to or below the trailing stop
//! `peak - multiplier * ATR`, where `peak` is the highest close since entry.

use crate::domain::error::QuantbtError;
use crate::domain::indicator::{atr, sma};
use crate::domain::ohlcv::PriceSeries;
use crate::domain::signal::{Signal, SignalPoint, SignalSeries};

use super::{validate_allocate, validate_positive, Strategy};

const NAME: &str = "atr_trailing_stop";

/// Window of the fixed entry filter (rolling mean of close).
const ENTRY_FILTER_WINDOW: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PositionState {
    Flat,
    Long { peak: f64 },
}

#[derive(Debug, Clone)]
pub struct AtrTrailingStop {
    window: usize,
    multiplier: f64,
    allocate: f64,
}

impl AtrTrailingStop {
    pub fn new(window: i64, multiplier: f64, allocate: f64) -> Result<Self, QuantbtError> {
        let window = validate_positive(NAME, "window", window)?;
        if multiplier <= 0.0 {
            return Err(QuantbtError::InvalidParameter {
                strategy: NAME,
                param: "multiplier",
                reason: format!("must be positive, got {multiplier}"),
            });
        }
        validate_allocate(NAME, allocate)?;
        Ok(Self {
            window,
            multiplier,
            allocate,
        })
    }

    /// One transition of the state machine. Entry needs both the filter mean
    /// and the ATR defined, so a position is never opened before its stop is
    /// computable.
    fn step(
        &self,
        state: PositionState,
        close: f64,
        entry_filter: Option<f64>,
        atr_value: Option<f64>,
    ) -> (Signal, PositionState) {
        match state {
            PositionState::Flat => match (entry_filter, atr_value) {
                (Some(mean), Some(_)) if close > mean => {
                    (Signal::Buy, PositionState::Long { peak: close })
                }
                _ => (Signal::Hold, PositionState::Flat),
            },
            PositionState::Long { peak } => {
                let peak = peak.max(close);
                match atr_value {
                    Some(range) if close <= peak - self.multiplier * range => {
                        (Signal::Sell, PositionState::Flat)
                    }
                    _ => (Signal::Hold, PositionState::Long { peak }),
                }
            }
        }
    }
}

impl Strategy for AtrTrailingStop {
    fn name(&self) -> &'static str {
        NAME
    }

    fn allocate(&self) -> f64 {
        self.allocate
    }

    fn generate_signals(&self, series: &PriceSeries) -> SignalSeries {
        let bars = series.bars();
        let entry_filter = sma(bars, ENTRY_FILTER_WINDOW);
        let ranges = atr(bars, self.window);

        let mut state = PositionState::Flat;
        let points = bars
            .iter()
            .enumerate()
            .map(|(i, bar)| {
                let (signal, next) =
                    self.step(state, bar.close, entry_filter.get(i), ranges.get(i));
                state = next;
                SignalPoint {
                    date: bar.date,
                    signal,
                }
            })
            .collect();
        SignalSeries::from_points(points)
    }
}
