//! Domain error types.

use chrono::NaiveDate;

/// Top-level error type for quantbt.
#[derive(Debug, thiserror::Error)]
pub enum QuantbtError {
    #[error("invalid parameter for {strategy}: {param} {reason}")]
    InvalidParameter {
        strategy: &'static str,
        param: &'static str,
        reason: String,
    },

    #[error("unknown strategy: {name}")]
    UnknownStrategy { name: String },

    #[error("missing required column: {column}")]
    MissingColumn { column: String },

    #[error("signal value {value} outside {{-1, 0, 1}}")]
    SignalValue { value: i8 },

    #[error("signal series length {got} does not match price series length {expected}")]
    SignalMismatch { expected: usize, got: usize },

    #[error("price series for {ticker} not sorted or has duplicate date {date}")]
    SeriesOrder { ticker: String, date: NaiveDate },

    #[error("non-finite {field} in price series for {ticker} on {date}")]
    SeriesValue {
        ticker: String,
        date: NaiveDate,
        field: &'static str,
    },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("no data for {ticker}: {reason}")]
    NoData { ticker: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&QuantbtError> for std::process::ExitCode {
    fn from(err: &QuantbtError) -> Self {
        let code: u8 = match err {
            QuantbtError::Io(_) => 1,
            QuantbtError::ConfigParse { .. }
            | QuantbtError::ConfigMissing { .. }
            | QuantbtError::ConfigInvalid { .. } => 2,
            QuantbtError::MissingColumn { .. }
            | QuantbtError::SeriesOrder { .. }
            | QuantbtError::SeriesValue { .. }
            | QuantbtError::SignalValue { .. }
            | QuantbtError::SignalMismatch { .. } => 3,
            QuantbtError::InvalidParameter { .. } | QuantbtError::UnknownStrategy { .. } => 4,
            QuantbtError::NoData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
