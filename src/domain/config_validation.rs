//! Configuration validation.
//!
//! Validates the `[data]` and `[analysis]` sections before an analysis run.

use crate::domain::bar::BarInterval;
use crate::domain::error::TrendlensError;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub fn validate_data_config(config: &dyn ConfigPort) -> Result<(), TrendlensError> {
    validate_path(config)?;
    validate_exchange(config)?;
    Ok(())
}

pub fn validate_analysis_config(config: &dyn ConfigPort) -> Result<(), TrendlensError> {
    validate_bar_count(config)?;
    validate_interval(config)?;
    validate_dates(config)?;
    Ok(())
}

fn validate_path(config: &dyn ConfigPort) -> Result<(), TrendlensError> {
    match config.get_string("data", "path") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(TrendlensError::ConfigMissing {
            section: "data".to_string(),
            key: "path".to_string(),
        }),
    }
}

fn validate_exchange(config: &dyn ConfigPort) -> Result<(), TrendlensError> {
    match config.get_string("data", "exchange") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(TrendlensError::ConfigMissing {
            section: "data".to_string(),
            key: "exchange".to_string(),
        }),
    }
}

fn validate_bar_count(config: &dyn ConfigPort) -> Result<(), TrendlensError> {
    let value = config.get_int("analysis", "bar_count", 0);
    if value < 1 {
        return Err(TrendlensError::ConfigInvalid {
            section: "analysis".to_string(),
            key: "bar_count".to_string(),
            reason: "bar_count must be at least 1".to_string(),
        });
    }
    Ok(())
}

fn validate_interval(config: &dyn ConfigPort) -> Result<(), TrendlensError> {
    match config.get_string("analysis", "interval") {
        None => Ok(()),
        Some(s) if BarInterval::parse(&s).is_some() => Ok(()),
        Some(_) => Err(TrendlensError::ConfigInvalid {
            section: "analysis".to_string(),
            key: "interval".to_string(),
            reason: "interval must be daily, weekly, monthly or quarterly".to_string(),
        }),
    }
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(), TrendlensError> {
    let start = parse_date(config.get_string("analysis", "start_date").as_deref(), "start_date")?;
    let end = parse_date(config.get_string("analysis", "end_date").as_deref(), "end_date")?;

    match (start, end) {
        (Some(_), None) => Err(TrendlensError::ConfigInvalid {
            section: "analysis".to_string(),
            key: "end_date".to_string(),
            reason: "end_date is required when start_date is set".to_string(),
        }),
        (Some(s), Some(e)) if s >= e => Err(TrendlensError::ConfigInvalid {
            section: "analysis".to_string(),
            key: "start_date".to_string(),
            reason: "start_date must be before end_date".to_string(),
        }),
        _ => Ok(()),
    }
}

fn parse_date(
    value: Option<&str>,
    field: &str,
) -> Result<Option<NaiveDate>, TrendlensError> {
    match value {
        None => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d").map(Some).map_err(|_| {
            TrendlensError::ConfigInvalid {
                section: "analysis".to_string(),
                key: field.to_string(),
                reason: format!("invalid {} format, expected YYYY-MM-DD", field),
            }
        }),
    }
}
