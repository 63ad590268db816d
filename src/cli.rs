//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvDataAdapter;
use crate::adapters::csv_report_adapter::{render_table, CsvReportAdapter};
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::backtest::BacktestConfig;
use crate::domain::batch::{parse_tickers, run_batch};
use crate::domain::config_validation::validate_backtest_config;
use crate::domain::error::QuantbtError;
use crate::domain::metrics::MetricsConfig;
use crate::domain::strategy;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "quantbt", about = "Rule-based backtester for daily OHLCV series")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the configured strategy over the configured tickers
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        /// Comma-separated ticker override, e.g. GOOGL,WMT,AMD
        #[arg(short, long)]
        tickers: Option<String>,
        /// Stats CSV path (default: batch_stats_<strategy>.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Validate configuration and resolve the strategy without running
        #[arg(long)]
        dry_run: bool,
    },
    /// Validate a configuration file, including strategy construction
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List tickers with a price file in the configured data directory
    ListTickers {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show the data range for one ticker
    Info {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        ticker: String,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest {
            config,
            tickers,
            output,
            dry_run,
        } => {
            if dry_run {
                run_dry_run(&config)
            } else {
                run_backtest_command(&config, tickers.as_deref(), output.as_ref())
            }
        }
        Command::Validate { config } => run_validate(&config),
        Command::ListTickers { config } => run_list_tickers(&config),
        Command::Info { config, ticker } => run_info(&config, &ticker),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = QuantbtError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

pub fn build_backtest_config(adapter: &dyn ConfigPort) -> BacktestConfig {
    BacktestConfig {
        initial_capital: adapter.get_double("backtest", "initial_capital", 100_000.0),
    }
}

pub fn build_metrics_config(adapter: &dyn ConfigPort) -> MetricsConfig {
    MetricsConfig {
        risk_free_rate: adapter.get_double("backtest", "risk_free_rate", 0.0),
        ..MetricsConfig::default()
    }
}

fn resolve_tickers(
    adapter: &dyn ConfigPort,
    ticker_override: Option<&str>,
) -> Result<Vec<String>, ExitCode> {
    let raw = match ticker_override {
        Some(t) => t.to_string(),
        None => match adapter.get_string("backtest", "tickers") {
            Some(t) => t,
            None => {
                eprintln!("error: no tickers configured");
                return Err(ExitCode::from(2));
            }
        },
    };

    parse_tickers(&raw).map_err(|e| {
        eprintln!("error: failed to parse tickers: {e}");
        ExitCode::from(2)
    })
}

fn resolve_data_dir(adapter: &dyn ConfigPort) -> Result<PathBuf, ExitCode> {
    match adapter.get_string("backtest", "data_dir") {
        Some(dir) => Ok(PathBuf::from(dir)),
        None => {
            eprintln!("error: data_dir is required");
            Err(ExitCode::from(2))
        }
    }
}

pub fn run_backtest_command(
    config_path: &PathBuf,
    ticker_override: Option<&str>,
    output_path: Option<&PathBuf>,
) -> ExitCode {
    // Stage 1: Load and validate config
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    if let Err(e) = validate_backtest_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    // Stage 2: Build the strategy (parameter validation happens here)
    let strategy = match strategy::from_config(&adapter) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    eprintln!("Strategy: {}", strategy.name());

    // Stage 3: Resolve universe and data source
    let tickers = match resolve_tickers(&adapter, ticker_override) {
        Ok(t) => t,
        Err(code) => return code,
    };
    let data_dir = match resolve_data_dir(&adapter) {
        Ok(d) => d,
        Err(code) => return code,
    };
    let data_port = CsvDataAdapter::new(data_dir);

    let bt_config = build_backtest_config(&adapter);
    let metrics_config = build_metrics_config(&adapter);

    // Stage 4: Run the batch; per-ticker failures are skipped inside
    eprintln!("Backtesting {} tickers...", tickers.len());
    let result = match run_batch(&data_port, &tickers, strategy.as_ref(), &bt_config, &metrics_config)
    {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 5: Console table and stats CSV
    println!("\n=== Batch Backtest Results ===");
    print!("{}", render_table(&result.records));
    if !result.skipped.is_empty() {
        eprintln!(
            "Skipped {} of {} tickers",
            result.skipped.len(),
            tickers.len()
        );
    }

    let output = output_path
        .cloned()
        .unwrap_or_else(|| PathBuf::from(format!("batch_stats_{}.csv", strategy.name())));

    match CsvReportAdapter.write(&result.records, &output) {
        Ok(()) => {
            eprintln!("Saved results to {}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to write results: {e}");
            (&e).into()
        }
    }
}

pub fn run_dry_run(config_path: &PathBuf) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_backtest_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let strategy = match strategy::from_config(&adapter) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let tickers = match resolve_tickers(&adapter, None) {
        Ok(t) => t,
        Err(code) => return code,
    };

    eprintln!("Strategy: {} (allocate {})", strategy.name(), strategy.allocate());
    eprintln!("Tickers: {}", tickers.join(", "));
    eprintln!("Dry run complete: configuration is valid");
    ExitCode::SUCCESS
}

pub fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_backtest_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    match strategy::from_config(&adapter) {
        Ok(strategy) => {
            eprintln!("Config valid; strategy: {}", strategy.name());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn run_list_tickers(config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    let data_dir = match resolve_data_dir(&adapter) {
        Ok(d) => d,
        Err(code) => return code,
    };

    match CsvDataAdapter::new(data_dir).list_tickers() {
        Ok(tickers) => {
            if tickers.is_empty() {
                eprintln!("No price files found");
            } else {
                for ticker in &tickers {
                    println!("{ticker}");
                }
                eprintln!("{} tickers found", tickers.len());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn run_info(config_path: &PathBuf, ticker: &str) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    let data_dir = match resolve_data_dir(&adapter) {
        Ok(d) => d,
        Err(code) => return code,
    };

    match CsvDataAdapter::new(data_dir).fetch_series(ticker) {
        Ok(series) => {
            match series.date_range() {
                Some((start, end)) => {
                    println!("{ticker}: {} bars, {start} to {end}", series.len());
                }
                None => {
                    println!("{ticker}: 0 bars");
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}
