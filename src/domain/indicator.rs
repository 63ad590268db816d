//! Rolling-window indicator kernels shared by the signal generators.
//!
//! Every function returns one point per input bar. Points inside the warmup
//! region (insufficient history) carry `valid = false`; strategies treat them
//! as undefined and never signal on them.

use chrono::NaiveDate;

use super::ohlcv::OhlcvBar;

#[derive(Debug, Clone, Copy)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub valid: bool,
    pub value: f64,
}

#[derive(Debug, Clone)]
pub struct IndicatorSeries {
    pub values: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    /// Value at bar index, None inside the warmup region.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values
            .get(index)
            .filter(|p| p.valid)
            .map(|p| p.value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn windowed<F>(bars: &[OhlcvBar], period: usize, mut compute: F) -> IndicatorSeries
where
    F: FnMut(&[OhlcvBar]) -> f64,
{
    let warmup = period.saturating_sub(1);
    let values = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let valid = period > 0 && i >= warmup;
            let value = if valid {
                compute(&bars[i + 1 - period..=i])
            } else {
                0.0
            };
            IndicatorPoint {
                date: bar.date,
                valid,
                value,
            }
        })
        .collect();
    IndicatorSeries { values }
}

/// Simple moving average of closing prices.
pub fn sma(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    windowed(bars, period, |window| {
        window.iter().map(|b| b.close).sum::<f64>() / window.len() as f64
    })
}

/// Population standard deviation of closing prices over the window.
pub fn rolling_stddev(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    windowed(bars, period, |window| {
        let n = window.len() as f64;
        let mean = window.iter().map(|b| b.close).sum::<f64>() / n;
        let variance = window
            .iter()
            .map(|b| {
                let diff = b.close - mean;
                diff * diff
            })
            .sum::<f64>()
            / n;
        variance.sqrt()
    })
}

/// Highest high over the window.
pub fn rolling_max_high(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    windowed(bars, period, |window| {
        window.iter().map(|b| b.high).fold(f64::MIN, f64::max)
    })
}

/// Lowest low over the window.
pub fn rolling_min_low(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    windowed(bars, period, |window| {
        window.iter().map(|b| b.low).fold(f64::MAX, f64::min)
    })
}

/// Relative Strength Index from simple rolling averages of gains and losses
/// over the last `period` one-bar changes.
///
/// RSI = 100 - 100 / (1 + avg_gain / avg_loss); zero average loss maps to 100
/// so no division by zero ever reaches the caller. The first `period` bars
/// are warmup (a bar needs `period` preceding changes).
pub fn rsi(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let mut gains = Vec::with_capacity(bars.len().saturating_sub(1));
    let mut losses = Vec::with_capacity(bars.len().saturating_sub(1));
    for window in bars.windows(2) {
        let change = window[1].close - window[0].close;
        gains.push(change.max(0.0));
        losses.push((-change).max(0.0));
    }

    let values = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let valid = period > 0 && i >= period;
            let value = if valid {
                let start = i - period;
                let avg_gain = gains[start..i].iter().sum::<f64>() / period as f64;
                let avg_loss = losses[start..i].iter().sum::<f64>() / period as f64;
                if avg_loss == 0.0 {
                    100.0
                } else {
                    100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
                }
            } else {
                0.0
            };
            IndicatorPoint {
                date: bar.date,
                valid,
                value,
            }
        })
        .collect();
    IndicatorSeries { values }
}

/// Average True Range: rolling mean of per-bar true range over the window.
/// The first bar has no previous close, so its true range is high - low.
pub fn atr(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let tr: Vec<f64> = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            if i == 0 {
                bar.high - bar.low
            } else {
                bar.true_range(bars[i - 1].close)
            }
        })
        .collect();

    let warmup = period.saturating_sub(1);
    let values = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let valid = period > 0 && i >= warmup;
            let value = if valid {
                tr[i + 1 - period..=i].iter().sum::<f64>() / period as f64
            } else {
                0.0
            };
            IndicatorPoint {
                date: bar.date,
                valid,
                value,
            }
        })
        .collect();
    IndicatorSeries { values }
}
