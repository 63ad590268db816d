//! Price data access port trait.

use crate::domain::error::QuantbtError;
use crate::domain::ohlcv::PriceSeries;

pub trait DataPort {
    /// Load the full validated price series for one ticker.
    fn fetch_series(&self, ticker: &str) -> Result<PriceSeries, QuantbtError>;

    /// Tickers this source can serve, sorted ascending.
    fn list_tickers(&self) -> Result<Vec<String>, QuantbtError>;
}
