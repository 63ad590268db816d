//! Batch orchestration: one strategy across many tickers.
//!
//! Runs are independent; a ticker that fails to load is skipped with a
//! warning and the batch continues. Only a batch where every ticker fails is
//! an error.

use std::collections::HashSet;

use super::backtest::{run_backtest, BacktestConfig};
use super::error::QuantbtError;
use super::metrics::{MetricsConfig, PerformanceStats};
use super::strategy::Strategy;
use crate::ports::data_port::DataPort;

/// One row of batch output.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchRecord {
    pub ticker: String,
    pub stats: PerformanceStats,
}

#[derive(Debug, Clone)]
pub struct SkippedTicker {
    pub ticker: String,
    pub reason: String,
}

#[derive(Debug)]
pub struct BatchResult {
    pub records: Vec<BatchRecord>,
    pub skipped: Vec<SkippedTicker>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum TickerListError {
    #[error("empty token in ticker list")]
    EmptyToken,

    #[error("duplicate ticker: {0}")]
    DuplicateTicker(String),
}

/// Parse a comma-separated ticker list: trimmed, uppercased, duplicates and
/// empty tokens rejected.
pub fn parse_tickers(input: &str) -> Result<Vec<String>, TickerListError> {
    let mut tickers = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(TickerListError::EmptyToken);
        }
        let ticker = trimmed.to_uppercase();
        if seen.contains(&ticker) {
            return Err(TickerListError::DuplicateTicker(ticker));
        }
        seen.insert(ticker.clone());
        tickers.push(ticker);
    }

    Ok(tickers)
}

/// Run `strategy` over every ticker, collecting one stats record per
/// successful run.
pub fn run_batch(
    data_port: &dyn DataPort,
    tickers: &[String],
    strategy: &dyn Strategy,
    config: &BacktestConfig,
    metrics_config: &MetricsConfig,
) -> Result<BatchResult, QuantbtError> {
    let mut records = Vec::with_capacity(tickers.len());
    let mut skipped = Vec::new();

    for ticker in tickers {
        let series = match data_port.fetch_series(ticker) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Warning: skipping {ticker} ({e})");
                skipped.push(SkippedTicker {
                    ticker: ticker.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let result = match run_backtest(&series, strategy, config) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("Warning: skipping {ticker} ({e})");
                skipped.push(SkippedTicker {
                    ticker: ticker.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let stats = PerformanceStats::compute(&result.equity_curve, metrics_config);
        records.push(BatchRecord {
            ticker: ticker.clone(),
            stats,
        });
    }

    if records.is_empty() && !tickers.is_empty() {
        return Err(QuantbtError::NoData {
            ticker: tickers.join(","),
            reason: "every ticker in the batch failed".into(),
        });
    }

    Ok(BatchResult { records, skipped })
}
