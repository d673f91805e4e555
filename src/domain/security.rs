//! Security identity and per-interval bar storage.

use crate::domain::bar::{BarInterval, BarSeries, PriceBar};
use chrono::NaiveDate;
use std::collections::HashMap;

/// One listed security with its bar sequences, keyed by interval. The series
/// own their bars; analysis passes borrow them through this struct.
#[derive(Debug, Clone)]
pub struct Security {
    pub ticker: String,
    pub exchange: String,
    series: HashMap<BarInterval, BarSeries>,
}

impl Security {
    pub fn new(ticker: String, exchange: String) -> Self {
        Security {
            ticker,
            exchange,
            series: HashMap::new(),
        }
    }

    /// Install the bar sequence for an interval, replacing any prior one.
    /// Bars must already be ordered by date.
    pub fn set_bars(&mut self, interval: BarInterval, bars: Vec<PriceBar>) {
        self.series.insert(interval, BarSeries::new(bars));
    }

    pub fn series(&self, interval: BarInterval) -> Option<&BarSeries> {
        self.series.get(&interval)
    }

    pub fn series_mut(&mut self, interval: BarInterval) -> Option<&mut BarSeries> {
        self.series.get_mut(&interval)
    }

    pub fn bar_count(&self, interval: BarInterval) -> usize {
        self.series.get(&interval).map_or(0, |s| s.len())
    }

    pub fn first_bar(&self, interval: BarInterval) -> Option<&PriceBar> {
        self.series.get(&interval).and_then(|s| s.first())
    }

    pub fn last_bar(&self, interval: BarInterval) -> Option<&PriceBar> {
        self.series.get(&interval).and_then(|s| s.last())
    }

    pub fn bar_at(&self, interval: BarInterval, date: NaiveDate) -> Option<&PriceBar> {
        self.series.get(&interval).and_then(|s| s.bar_at(date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_bar(date: &str, close: f64) -> PriceBar {
        PriceBar::new(
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            close - 1.0,
            close + 1.0,
            close - 2.0,
            close,
            1000,
        )
    }

    fn sample_security() -> Security {
        let mut security = Security::new("BHP".into(), "ASX".into());
        security.set_bars(
            BarInterval::Daily,
            vec![
                make_bar("2024-01-01", 100.0),
                make_bar("2024-01-02", 101.0),
                make_bar("2024-01-03", 102.0),
            ],
        );
        security
    }

    #[test]
    fn set_and_get_series() {
        let security = sample_security();
        assert_eq!(security.bar_count(BarInterval::Daily), 3);
        assert_eq!(security.bar_count(BarInterval::Weekly), 0);
        assert!(security.series(BarInterval::Weekly).is_none());
    }

    #[test]
    fn first_and_last_bar() {
        let security = sample_security();
        assert_eq!(
            security.first_bar(BarInterval::Daily).unwrap().date,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
        assert_eq!(
            security.last_bar(BarInterval::Daily).unwrap().date,
            NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()
        );
        assert!(security.first_bar(BarInterval::Monthly).is_none());
    }

    #[test]
    fn bar_at_date() {
        let security = sample_security();
        let bar = security
            .bar_at(BarInterval::Daily, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap())
            .unwrap();
        assert!((bar.close - 101.0).abs() < f64::EPSILON);
    }

    #[test]
    fn set_bars_replaces_prior_series() {
        let mut security = sample_security();
        security.set_bars(BarInterval::Daily, vec![make_bar("2024-02-01", 50.0)]);
        assert_eq!(security.bar_count(BarInterval::Daily), 1);
    }
}
