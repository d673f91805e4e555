//! Trend segmentation and per-trend-type performance aggregation.
//!
//! Walks a classified bar sequence, detects trend-segment boundaries and
//! maintains a running average of net percentage change per trend type.

use crate::domain::bar::BarInterval;
use crate::domain::calendar::snap_to_interval;
use crate::domain::error::TrendlensError;
use crate::domain::security::Security;
use crate::ports::classifier_port::SwingClassifierPort;
use chrono::NaiveDate;
use std::fmt;

/// Trend label assigned to a bar for one lookback window. `NotSet` marks
/// bars the classifier could not qualify and is never aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrendQualification {
    NotSet,
    Uptrend,
    Downtrend,
}

impl TrendQualification {
    pub const ALL: [TrendQualification; 3] = [
        TrendQualification::NotSet,
        TrendQualification::Uptrend,
        TrendQualification::Downtrend,
    ];
}

impl fmt::Display for TrendQualification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendQualification::NotSet => write!(f, "not set"),
            TrendQualification::Uptrend => write!(f, "uptrend"),
            TrendQualification::Downtrend => write!(f, "downtrend"),
        }
    }
}

/// Running aggregate for one trend type. The average is maintained
/// incrementally; no segment history is stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NetChangeByTrendType {
    pub trend_type: TrendQualification,
    pub occurrences: usize,
    pub average_change: f64,
}

impl NetChangeByTrendType {
    pub fn new(trend_type: TrendQualification) -> Self {
        NetChangeByTrendType {
            trend_type,
            occurrences: 0,
            average_change: 0.0,
        }
    }

    /// Fold one finalized segment into the running average. A segment whose
    /// opening price is zero is dropped without incrementing the count.
    fn add_segment(&mut self, first_open: f64, last_close: f64) {
        if first_open == 0.0 {
            return;
        }
        let change_percent = (last_close - first_open) / first_open;
        self.average_change = (self.average_change * self.occurrences as f64 + change_percent)
            / (self.occurrences as f64 + 1.0);
        self.occurrences += 1;
    }
}

/// Aggregate net percentage change per trend type over a security's bar
/// sequence.
///
/// With no `start`, the full series range is used (a supplied `end` is
/// ignored). A `start` without an `end` is an invalid range. Non-daily
/// endpoints snap to the interval's first trading day before lookup. The walk
/// always runs to the end of the series; the trailing unbounded segment is
/// never counted.
///
/// Classification for `bar_count` is ensured through `classifier` once per
/// series and cached, so repeat calls never recompute.
pub fn net_change_by_trend_type(
    security: &mut Security,
    classifier: &dyn SwingClassifierPort,
    interval: BarInterval,
    bar_count: usize,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<Vec<NetChangeByTrendType>, TrendlensError> {
    let ticker = security.ticker.clone();
    let Some(series) = security.series_mut(interval) else {
        return Ok(Vec::new());
    };
    if series.is_empty() {
        return Ok(Vec::new());
    }

    let (start, end) = match (start, end) {
        (None, _) => {
            // Full range: both endpoints come from the series itself.
            let first = series.first().map(|b| b.date);
            let last = series.last().map(|b| b.date);
            match (first, last) {
                (Some(f), Some(l)) => (f, l),
                _ => return Ok(Vec::new()),
            }
        }
        (Some(s), None) => return Err(TrendlensError::InvalidRange { start: s }),
        (Some(s), Some(e)) => (s, e),
    };
    let start = snap_to_interval(interval, start);
    let _end = snap_to_interval(interval, end);

    if !series.has_trends(bar_count) {
        let trends = classifier.classify(series, bar_count);
        series.set_trends(bar_count, trends);
    }

    let mut records: Vec<NetChangeByTrendType> = TrendQualification::ALL
        .iter()
        .filter(|t| **t != TrendQualification::NotSet)
        .map(|t| NetChangeByTrendType::new(*t))
        .collect();

    let mut index = series
        .index_of(start)
        .ok_or(TrendlensError::BarNotFound {
            ticker,
            interval,
            date: start,
        })?;

    let trend_of = |i: usize| {
        series
            .trend_at(bar_count, i)
            .unwrap_or(TrendQualification::NotSet)
    };

    // The run containing the start bar may have begun before the range; its
    // true extent is unknowable, so it is discarded.
    let mut current_trend = trend_of(index);
    while index < series.len() && trend_of(index) == current_trend {
        index += 1;
    }

    // A trend change is observed at the bar where the new classification
    // first appears, so a segment is measured from the bar after one
    // boundary through the bar of the next.
    let mut first_of_segment: Option<usize> = None;
    while index < series.len() {
        let trend = trend_of(index);
        if trend != current_trend {
            if let Some(first) = first_of_segment {
                if let Some(record) = records.iter_mut().find(|r| r.trend_type == current_trend) {
                    let first_open = series.bars()[first].open;
                    let last_close = series.bars()[index].close;
                    record.add_segment(first_open, last_close);
                }
            }
            first_of_segment = Some(index + 1);
            current_trend = trend;
        }
        index += 1;
    }

    Ok(records)
}
