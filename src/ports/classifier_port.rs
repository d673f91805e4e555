//! Swing classifier port trait.

use crate::domain::bar::BarSeries;
use crate::domain::trend::TrendQualification;

/// Assigns a trend qualification to every bar of a series for one lookback
/// window. Implementations must be deterministic and pure: the same series
/// and `bar_count` always produce the same labelling, one entry per bar.
/// Bars the classifier cannot qualify are labelled `NotSet`.
pub trait SwingClassifierPort {
    fn classify(&self, series: &BarSeries, bar_count: usize) -> Vec<TrendQualification>;
}
