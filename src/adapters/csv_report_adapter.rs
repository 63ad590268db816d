//! CSV batch-stats report adapter, plus the console table used by the CLI.

use std::path::Path;

use crate::domain::batch::BatchRecord;
use crate::domain::error::QuantbtError;
use crate::ports::report_port::ReportPort;

pub struct CsvReportAdapter;

impl ReportPort for CsvReportAdapter {
    fn write(&self, records: &[BatchRecord], output_path: &Path) -> Result<(), QuantbtError> {
        let mut writer = csv::Writer::from_path(output_path).map_err(csv_io_error)?;

        writer
            .write_record([
                "ticker",
                "total_return",
                "annualized_volatility",
                "sharpe_ratio",
                "max_drawdown",
            ])
            .map_err(csv_io_error)?;

        for record in records {
            writer
                .write_record([
                    record.ticker.clone(),
                    format!("{:.6}", record.stats.total_return),
                    format!("{:.6}", record.stats.annualized_volatility),
                    format!("{:.6}", record.stats.sharpe_ratio),
                    format!("{:.6}", record.stats.max_drawdown),
                ])
                .map_err(csv_io_error)?;
        }

        writer.flush()?;
        Ok(())
    }
}

fn csv_io_error(err: csv::Error) -> QuantbtError {
    QuantbtError::Io(std::io::Error::other(err))
}

/// Fixed-width comparison table for the console summary.
pub fn render_table(records: &[BatchRecord]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<8} {:>12} {:>12} {:>8} {:>12}\n",
        "ticker", "total_ret", "ann_vol", "sharpe", "max_dd"
    ));
    for record in records {
        out.push_str(&format!(
            "{:<8} {:>11.2}% {:>11.2}% {:>8.2} {:>11.2}%\n",
            record.ticker,
            record.stats.total_return * 100.0,
            record.stats.annualized_volatility * 100.0,
            record.stats.sharpe_ratio,
            record.stats.max_drawdown * 100.0,
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::metrics::PerformanceStats;
    use std::fs;
    use tempfile::TempDir;

    fn sample_records() -> Vec<BatchRecord> {
        vec![
            BatchRecord {
                ticker: "GOOGL".into(),
                stats: PerformanceStats {
                    total_return: 0.25,
                    annualized_volatility: 0.18,
                    sharpe_ratio: 1.4,
                    max_drawdown: -0.12,
                },
            },
            BatchRecord {
                ticker: "WMT".into(),
                stats: PerformanceStats::zero(),
            },
        ]
    }

    #[test]
    fn writes_header_and_one_row_per_record() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stats.csv");

        CsvReportAdapter.write(&sample_records(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "ticker,total_return,annualized_volatility,sharpe_ratio,max_drawdown"
        );
        assert!(lines[1].starts_with("GOOGL,0.250000,"));
        assert!(lines[2].starts_with("WMT,0.000000,"));
    }

    #[test]
    fn write_to_bad_path_errors() {
        let result = CsvReportAdapter.write(&sample_records(), Path::new("/nonexistent/x.csv"));
        assert!(result.is_err());
    }

    #[test]
    fn table_lists_every_ticker() {
        let table = render_table(&sample_records());
        assert!(table.contains("GOOGL"));
        assert!(table.contains("WMT"));
        assert!(table.lines().count() == 3);
        assert!(table.contains("25.00%"));
    }
}
