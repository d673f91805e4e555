//! Trading-calendar date snapping.
//!
//! Weekly, monthly and quarterly bars are keyed by the first trading day of
//! their period, so range endpoints must be snapped before bar lookup.
//! Trading days are Monday through Friday; exchange holidays are not modelled.

use crate::domain::bar::BarInterval;
use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Monday of the week containing `date`.
pub fn first_trading_day_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// First weekday of the month containing `date`.
pub fn first_trading_day_of_month(date: NaiveDate) -> NaiveDate {
    let first = date.with_day(1).unwrap_or(date);
    skip_weekend(first)
}

/// First weekday of the calendar quarter containing `date`.
pub fn first_trading_day_of_quarter(date: NaiveDate) -> NaiveDate {
    let quarter_month = ((date.month() - 1) / 3) * 3 + 1;
    let first = date
        .with_day(1)
        .and_then(|d| d.with_month(quarter_month))
        .unwrap_or(date);
    skip_weekend(first)
}

/// Snap `date` to the bar timestamp convention for `interval`. Daily dates
/// pass through unchanged.
pub fn snap_to_interval(interval: BarInterval, date: NaiveDate) -> NaiveDate {
    match interval {
        BarInterval::Daily => date,
        BarInterval::Weekly => first_trading_day_of_week(date),
        BarInterval::Monthly => first_trading_day_of_month(date),
        BarInterval::Quarterly => first_trading_day_of_quarter(date),
    }
}

fn skip_weekend(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat => date + Duration::days(2),
        Weekday::Sun => date + Duration::days(1),
        _ => date,
    }
}
