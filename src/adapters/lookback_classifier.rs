//! Lookback swing-classifier adapter.
//!
//! Labels a bar by the sign of its close change over the lookback window:
//! a close above the close `bar_count` bars earlier is an uptrend, below a
//! downtrend. Bars inside the warmup window, and unchanged closes, are
//! `NotSet`. Deterministic and pure, so repeat classification of the same
//! series always agrees.

use crate::domain::bar::BarSeries;
use crate::domain::trend::TrendQualification;
use crate::ports::classifier_port::SwingClassifierPort;

#[derive(Debug, Clone, Copy, Default)]
pub struct LookbackClassifier;

impl SwingClassifierPort for LookbackClassifier {
    fn classify(&self, series: &BarSeries, bar_count: usize) -> Vec<TrendQualification> {
        let bars = series.bars();
        let mut trends = Vec::with_capacity(bars.len());

        for i in 0..bars.len() {
            if bar_count == 0 || i < bar_count {
                trends.push(TrendQualification::NotSet);
                continue;
            }

            let reference = bars[i - bar_count].close;
            let close = bars[i].close;
            let trend = if close > reference {
                TrendQualification::Uptrend
            } else if close < reference {
                TrendQualification::Downtrend
            } else {
                TrendQualification::NotSet
            };
            trends.push(trend);
        }

        trends
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bar::PriceBar;
    use chrono::NaiveDate;

    fn make_series(closes: &[f64]) -> BarSeries {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| {
                PriceBar::new(
                    NaiveDate::from_ymd_opt(2024, 1, (i + 1) as u32).unwrap(),
                    close,
                    close + 1.0,
                    close - 1.0,
                    close,
                    1000,
                )
            })
            .collect();
        BarSeries::new(bars)
    }

    #[test]
    fn warmup_bars_are_not_set() {
        let series = make_series(&[100.0, 105.0, 110.0, 115.0]);
        let trends = LookbackClassifier.classify(&series, 3);

        assert_eq!(trends.len(), 4);
        assert_eq!(trends[0], TrendQualification::NotSet);
        assert_eq!(trends[1], TrendQualification::NotSet);
        assert_eq!(trends[2], TrendQualification::NotSet);
        assert_eq!(trends[3], TrendQualification::Uptrend);
    }

    #[test]
    fn rising_and_falling_closes() {
        let series = make_series(&[100.0, 105.0, 95.0, 90.0]);
        let trends = LookbackClassifier.classify(&series, 2);

        // 95 vs 100 → down, 90 vs 105 → down
        assert_eq!(trends[2], TrendQualification::Downtrend);
        assert_eq!(trends[3], TrendQualification::Downtrend);
    }

    #[test]
    fn unchanged_close_is_not_set() {
        let series = make_series(&[100.0, 105.0, 100.0]);
        let trends = LookbackClassifier.classify(&series, 2);
        assert_eq!(trends[2], TrendQualification::NotSet);
    }

    #[test]
    fn zero_bar_count_is_all_not_set() {
        let series = make_series(&[100.0, 105.0]);
        let trends = LookbackClassifier.classify(&series, 0);
        assert!(trends.iter().all(|t| *t == TrendQualification::NotSet));
    }

    #[test]
    fn classification_is_deterministic() {
        let series = make_series(&[100.0, 105.0, 95.0, 110.0, 90.0]);
        let first = LookbackClassifier.classify(&series, 2);
        let second = LookbackClassifier.classify(&series, 2);
        assert_eq!(first, second);
    }
}
