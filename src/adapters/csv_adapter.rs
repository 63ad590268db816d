//! CSV price-file data adapter.
//!
//! Reads `{data_dir}/{ticker}.csv` with a `Date,Open,High,Low,Close,Volume`
//! header (columns resolved by name, extra columns ignored). Rows that fail
//! to parse, carry non-finite numbers, or repeat an already-seen date are
//! dropped; surviving rows are sorted ascending by date and validated into a
//! [`PriceSeries`].

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::domain::error::QuantbtError;
use crate::domain::ohlcv::{OhlcvBar, PriceSeries};
use crate::ports::data_port::DataPort;

const REQUIRED_COLUMNS: [&str; 6] = ["Date", "Open", "High", "Low", "Close", "Volume"];

pub struct CsvDataAdapter {
    data_dir: PathBuf,
}

impl CsvDataAdapter {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    fn csv_path(&self, ticker: &str) -> PathBuf {
        self.data_dir.join(format!("{ticker}.csv"))
    }

    /// Positions of the required columns in the header row.
    fn column_indices(headers: &csv::StringRecord) -> Result<[usize; 6], QuantbtError> {
        let mut indices = [0usize; 6];
        for (slot, column) in REQUIRED_COLUMNS.iter().enumerate() {
            indices[slot] = headers
                .iter()
                .position(|h| h.trim() == *column)
                .ok_or_else(|| QuantbtError::MissingColumn {
                    column: (*column).to_string(),
                })?;
        }
        Ok(indices)
    }

    fn parse_row(record: &csv::StringRecord, indices: &[usize; 6]) -> Option<OhlcvBar> {
        let date = NaiveDate::parse_from_str(record.get(indices[0])?.trim(), "%Y-%m-%d").ok()?;

        let mut numbers = [0.0f64; 5];
        for (slot, &index) in indices[1..].iter().enumerate() {
            let value: f64 = record.get(index)?.trim().parse().ok()?;
            if !value.is_finite() {
                return None;
            }
            numbers[slot] = value;
        }

        Some(OhlcvBar {
            date,
            open: numbers[0],
            high: numbers[1],
            low: numbers[2],
            close: numbers[3],
            volume: numbers[4],
        })
    }
}

impl DataPort for CsvDataAdapter {
    fn fetch_series(&self, ticker: &str) -> Result<PriceSeries, QuantbtError> {
        let path = self.csv_path(ticker);
        let content = fs::read_to_string(&path).map_err(|e| QuantbtError::NoData {
            ticker: ticker.to_string(),
            reason: format!("failed to read {}: {e}", path.display()),
        })?;

        let mut reader = csv::Reader::from_reader(content.as_bytes());
        let headers = reader.headers().map_err(|e| QuantbtError::NoData {
            ticker: ticker.to_string(),
            reason: format!("CSV header error: {e}"),
        })?;
        let indices = Self::column_indices(headers)?;

        let mut bars = Vec::new();
        let mut seen_dates = HashSet::new();
        for record in reader.records() {
            let record = match record {
                Ok(r) => r,
                // Malformed rows are dropped, matching the loader contract.
                Err(_) => continue,
            };
            if let Some(bar) = Self::parse_row(&record, &indices) {
                if seen_dates.insert(bar.date) {
                    bars.push(bar);
                }
            }
        }

        bars.sort_by_key(|b| b.date);
        PriceSeries::new(ticker.to_string(), bars)
    }

    fn list_tickers(&self) -> Result<Vec<String>, QuantbtError> {
        let entries = fs::read_dir(&self.data_dir)?;

        let mut tickers = Vec::new();
        for entry in entries {
            let name = entry?.file_name();
            let name = name.to_string_lossy();
            if let Some(ticker) = name.strip_suffix(".csv") {
                tickers.push(ticker.to_string());
            }
        }

        tickers.sort();
        Ok(tickers)
    }
}
