//! Per-bar trading signals and their date-aligned series.

use chrono::NaiveDate;

use super::error::QuantbtError;
use super::ohlcv::PriceSeries;

/// A single per-bar decision, encoded as {+1, -1, 0} for arithmetic use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

impl Signal {
    pub fn value(self) -> i8 {
        match self {
            Signal::Buy => 1,
            Signal::Sell => -1,
            Signal::Hold => 0,
        }
    }
}

impl TryFrom<i8> for Signal {
    type Error = QuantbtError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Signal::Buy),
            -1 => Ok(Signal::Sell),
            0 => Ok(Signal::Hold),
            _ => Err(QuantbtError::SignalValue { value }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalPoint {
    pub date: NaiveDate,
    pub signal: Signal,
}

/// One signal per bar, same length and date order as the series it was
/// generated from.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalSeries {
    points: Vec<SignalPoint>,
}

impl SignalSeries {
    /// Internal constructor for generators that build one point per bar by
    /// construction; external signal input goes through [`SignalSeries::aligned`].
    pub(crate) fn from_points(points: Vec<SignalPoint>) -> Self {
        Self { points }
    }

    /// Pair raw signals with the dates of the series they were derived from.
    /// Fails if the lengths differ.
    pub fn aligned(series: &PriceSeries, signals: Vec<Signal>) -> Result<Self, QuantbtError> {
        if signals.len() != series.len() {
            return Err(QuantbtError::SignalMismatch {
                expected: series.len(),
                got: signals.len(),
            });
        }
        let points = series
            .bars()
            .iter()
            .zip(signals)
            .map(|(bar, signal)| SignalPoint {
                date: bar.date,
                signal,
            })
            .collect();
        Ok(Self { points })
    }

    pub fn points(&self) -> &[SignalPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn signals(&self) -> impl Iterator<Item = Signal> + '_ {
        self.points.iter().map(|p| p.signal)
    }

    /// Sum of the numeric signal values; +1 per Buy, -1 per Sell.
    pub fn sum(&self) -> i64 {
        self.points.iter().map(|p| p.signal.value() as i64).sum()
    }

    pub fn count_of(&self, signal: Signal) -> usize {
        self.points.iter().filter(|p| p.signal == signal).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ohlcv::OhlcvBar;

    fn series(closes: &[f64]) -> PriceSeries {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| OhlcvBar {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                    + chrono::Duration::days(i as i64),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1000.0,
            })
            .collect();
        PriceSeries::new("TEST".into(), bars).unwrap()
    }

    #[test]
    fn signal_values() {
        assert_eq!(Signal::Buy.value(), 1);
        assert_eq!(Signal::Sell.value(), -1);
        assert_eq!(Signal::Hold.value(), 0);
    }

    #[test]
    fn try_from_valid_values() {
        assert_eq!(Signal::try_from(1).unwrap(), Signal::Buy);
        assert_eq!(Signal::try_from(-1).unwrap(), Signal::Sell);
        assert_eq!(Signal::try_from(0).unwrap(), Signal::Hold);
    }

    #[test]
    fn try_from_out_of_range_fails() {
        let err = Signal::try_from(2).unwrap_err();
        assert!(matches!(err, QuantbtError::SignalValue { value: 2 }));
    }

    #[test]
    fn aligned_pairs_dates() {
        let s = series(&[100.0, 101.0, 102.0]);
        let signals = SignalSeries::aligned(&s, vec![Signal::Buy, Signal::Hold, Signal::Sell])
            .unwrap();

        assert_eq!(signals.len(), 3);
        assert_eq!(signals.points()[0].date, s.bars()[0].date);
        assert_eq!(signals.points()[0].signal, Signal::Buy);
        assert_eq!(signals.points()[2].signal, Signal::Sell);
    }

    #[test]
    fn aligned_rejects_length_mismatch() {
        let s = series(&[100.0, 101.0]);
        let err = SignalSeries::aligned(&s, vec![Signal::Buy]).unwrap_err();
        assert!(matches!(
            err,
            QuantbtError::SignalMismatch {
                expected: 2,
                got: 1
            }
        ));
    }

    #[test]
    fn sum_and_counts() {
        let s = series(&[100.0, 101.0, 102.0, 103.0]);
        let signals = SignalSeries::aligned(
            &s,
            vec![Signal::Buy, Signal::Hold, Signal::Sell, Signal::Buy],
        )
        .unwrap();

        assert_eq!(signals.sum(), 1);
        assert_eq!(signals.count_of(Signal::Buy), 2);
        assert_eq!(signals.count_of(Signal::Sell), 1);
        assert_eq!(signals.count_of(Signal::Hold), 1);
    }
}
