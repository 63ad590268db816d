//! Signal-generating strategies.
//!
//! Each variant validates its parameters at construction
//! (`new(...) -> Result<Self, QuantbtError>`) so a misconfigured strategy can
//! never produce signals. Generation itself is infallible: output length and
//! date order always match the input series.

pub mod atr_trailing_stop;
pub mod bollinger;
pub mod buy_and_hold;
pub mod donchian;
pub mod ma_trend;
pub mod momentum;
pub mod rsi;
pub mod sma_crossover;

pub use atr_trailing_stop::AtrTrailingStop;
pub use bollinger::BollingerBands;
pub use buy_and_hold::BuyAndHold;
pub use donchian::DonchianChannel;
pub use ma_trend::MaTrend;
pub use momentum::Momentum;
pub use rsi::Rsi;
pub use sma_crossover::SmaCrossover;

use crate::domain::error::QuantbtError;
use crate::domain::ohlcv::PriceSeries;
use crate::domain::signal::SignalSeries;
use crate::ports::config_port::ConfigPort;

pub trait Strategy: std::fmt::Debug {
    /// Registry name, also used in error payloads and batch output.
    fn name(&self) -> &'static str;

    /// Fraction of available cash committed on a Buy signal.
    fn allocate(&self) -> f64;

    /// One signal per bar, same length and date order as `series`.
    fn generate_signals(&self, series: &PriceSeries) -> SignalSeries;
}

pub(crate) fn validate_allocate(
    strategy: &'static str,
    allocate: f64,
) -> Result<(), QuantbtError> {
    if !(0.0..=1.0).contains(&allocate) {
        return Err(QuantbtError::InvalidParameter {
            strategy,
            param: "allocate",
            reason: format!("must be between 0 and 1, got {allocate}"),
        });
    }
    Ok(())
}

pub(crate) fn validate_positive(
    strategy: &'static str,
    param: &'static str,
    value: i64,
) -> Result<usize, QuantbtError> {
    if value <= 0 {
        return Err(QuantbtError::InvalidParameter {
            strategy,
            param,
            reason: format!("must be positive, got {value}"),
        });
    }
    Ok(value as usize)
}

/// Build a strategy from the `[strategy]` config section. The `name` key
/// selects the variant; parameter keys default to each variant's standard
/// values. Unknown names fail before any simulation work begins.
pub fn from_config(config: &dyn ConfigPort) -> Result<Box<dyn Strategy>, QuantbtError> {
    let name = config
        .get_string("strategy", "name")
        .ok_or_else(|| QuantbtError::ConfigMissing {
            section: "strategy".into(),
            key: "name".into(),
        })?;

    let allocate = config.get_double("strategy", "allocate", 1.0);

    let strategy: Box<dyn Strategy> = match name.as_str() {
        "buy_and_hold" => Box::new(BuyAndHold::new(allocate)?),
        "sma_crossover" => Box::new(SmaCrossover::new(
            config.get_int("strategy", "fast", 20),
            config.get_int("strategy", "slow", 50),
            allocate,
        )?),
        "rsi" => Box::new(Rsi::new(
            config.get_int("strategy", "period", 14),
            config.get_double("strategy", "lower", 30.0),
            config.get_double("strategy", "upper", 70.0),
            allocate,
        )?),
        "bollinger" => Box::new(BollingerBands::new(
            config.get_int("strategy", "window", 20),
            config.get_double("strategy", "num_std", 2.0),
            allocate,
        )?),
        "ma_trend" => Box::new(MaTrend::new(
            config.get_int("strategy", "window", 200),
            config.get_double("strategy", "buffer_pct", 0.0),
            allocate,
        )?),
        "momentum" => Box::new(Momentum::new(
            config.get_int("strategy", "lookback", 90),
            allocate,
        )?),
        "atr_trailing_stop" => Box::new(AtrTrailingStop::new(
            config.get_int("strategy", "window", 14),
            config.get_double("strategy", "multiplier", 3.0),
            allocate,
        )?),
        "donchian" => Box::new(DonchianChannel::new(
            config.get_int("strategy", "window", 20),
            config.get_double("strategy", "tolerance", 0.0),
            allocate,
        )?),
        _ => return Err(QuantbtError::UnknownStrategy { name }),
    };

    Ok(strategy)
}
