//! Pre-flight validation of the `[backtest]` config section.
//!
//! Strategy parameters are validated separately, at strategy construction.

use super::error::QuantbtError;
use crate::ports::config_port::ConfigPort;

pub fn validate_backtest_config(config: &dyn ConfigPort) -> Result<(), QuantbtError> {
    validate_initial_capital(config)?;
    validate_data_dir(config)?;
    validate_tickers(config)?;
    Ok(())
}

fn validate_initial_capital(config: &dyn ConfigPort) -> Result<(), QuantbtError> {
    let value = config.get_double("backtest", "initial_capital", 100_000.0);
    if value <= 0.0 || !value.is_finite() {
        return Err(QuantbtError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "initial_capital".to_string(),
            reason: "initial_capital must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_data_dir(config: &dyn ConfigPort) -> Result<(), QuantbtError> {
    match config.get_string("backtest", "data_dir") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(QuantbtError::ConfigMissing {
            section: "backtest".to_string(),
            key: "data_dir".to_string(),
        }),
    }
}

fn validate_tickers(config: &dyn ConfigPort) -> Result<(), QuantbtError> {
    match config.get_string("backtest", "tickers") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(QuantbtError::ConfigMissing {
            section: "backtest".to_string(),
            key: "tickers".to_string(),
        }),
    }
}
