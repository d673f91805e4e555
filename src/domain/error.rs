//! Domain error types.

use crate::domain::bar::BarInterval;
use chrono::NaiveDate;

/// Top-level error type for trendlens.
#[derive(Debug, thiserror::Error)]
pub enum TrendlensError {
    #[error("invalid date range: start {start} given without end")]
    InvalidRange { start: NaiveDate },

    #[error("security mismatch: summary holds {expected}, position is for {found}")]
    SecurityMismatch { expected: String, found: String },

    #[error("no {interval} bars for {ticker}")]
    NoData { ticker: String, interval: BarInterval },

    #[error("no {interval} bar at {date} for {ticker}")]
    BarNotFound {
        ticker: String,
        interval: BarInterval,
        date: NaiveDate,
    },

    #[error("zero days held: per-day and annualized returns are undefined")]
    ZeroDaysHeld,

    #[error("data error: {reason}")]
    Data { reason: String },

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

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&TrendlensError> for std::process::ExitCode {
    fn from(err: &TrendlensError) -> Self {
        let code: u8 = match err {
            TrendlensError::Io(_) => 1,
            TrendlensError::ConfigParse { .. }
            | TrendlensError::ConfigMissing { .. }
            | TrendlensError::ConfigInvalid { .. } => 2,
            TrendlensError::Data { .. } => 3,
            TrendlensError::InvalidRange { .. }
            | TrendlensError::SecurityMismatch { .. }
            | TrendlensError::ZeroDaysHeld => 4,
            TrendlensError::NoData { .. } | TrendlensError::BarNotFound { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
