//! OHLCV bar and validated price series.

use chrono::NaiveDate;
use std::collections::HashMap;

use super::error::QuantbtError;

#[derive(Debug, Clone, PartialEq)]
pub struct OhlcvBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl OhlcvBar {
    /// max(high - low, |high - prev_close|, |low - prev_close|)
    pub fn true_range(&self, prev_close: f64) -> f64 {
        let hl = self.high - self.low;
        let hc = (self.high - prev_close).abs();
        let lc = (self.low - prev_close).abs();
        hl.max(hc).max(lc)
    }

    fn check_finite(&self, ticker: &str) -> Result<(), QuantbtError> {
        let fields = [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
            ("volume", self.volume),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(QuantbtError::SeriesValue {
                    ticker: ticker.to_string(),
                    date: self.date,
                    field,
                });
            }
        }
        if self.volume < 0.0 {
            return Err(QuantbtError::SeriesValue {
                ticker: ticker.to_string(),
                date: self.date,
                field: "volume",
            });
        }
        Ok(())
    }
}

/// An ordered, read-only series of daily bars for one ticker.
///
/// Invariants checked at construction: dates strictly increasing and unique,
/// all numeric fields finite, volume non-negative.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    ticker: String,
    bars: Vec<OhlcvBar>,
    date_index: HashMap<NaiveDate, usize>,
}

impl PriceSeries {
    pub fn new(ticker: String, bars: Vec<OhlcvBar>) -> Result<Self, QuantbtError> {
        let mut date_index = HashMap::with_capacity(bars.len());
        for (i, bar) in bars.iter().enumerate() {
            bar.check_finite(&ticker)?;
            if i > 0 && bars[i - 1].date >= bar.date {
                return Err(QuantbtError::SeriesOrder {
                    ticker,
                    date: bar.date,
                });
            }
            date_index.insert(bar.date, i);
        }
        Ok(Self {
            ticker,
            bars,
            date_index,
        })
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn bars(&self) -> &[OhlcvBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bar_at(&self, date: NaiveDate) -> Option<&OhlcvBar> {
        self.date_index.get(&date).map(|&i| &self.bars[i])
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.bars.iter().map(|b| b.date)
    }

    /// First and last bar dates, None for an empty series.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.bars.first(), self.bars.last()) {
            (Some(first), Some(last)) => Some((first.date, last.date)),
            _ => None,
        }
    }
}
