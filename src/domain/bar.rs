//! Price bar representation and ordered bar sequences.

use crate::domain::pattern::{CandlestickPattern, Technical};
use crate::domain::trend::TrendQualification;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::fmt;

/// Bar granularity. Weekly/monthly/quarterly bars are timestamped at the
/// first trading day of their period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BarInterval {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
}

impl BarInterval {
    pub const ALL: [BarInterval; 4] = [
        BarInterval::Daily,
        BarInterval::Weekly,
        BarInterval::Monthly,
        BarInterval::Quarterly,
    ];

    /// Lowercase tag used in data file names and config values.
    pub fn tag(&self) -> &'static str {
        match self {
            BarInterval::Daily => "daily",
            BarInterval::Weekly => "weekly",
            BarInterval::Monthly => "monthly",
            BarInterval::Quarterly => "quarterly",
        }
    }

    pub fn parse(value: &str) -> Option<BarInterval> {
        match value.to_lowercase().as_str() {
            "daily" | "d" => Some(BarInterval::Daily),
            "weekly" | "w" => Some(BarInterval::Weekly),
            "monthly" | "m" => Some(BarInterval::Monthly),
            "quarterly" | "q" => Some(BarInterval::Quarterly),
            _ => None,
        }
    }
}

impl fmt::Display for BarInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One traded interval. OHLCV is immutable once stored; the flag sets are
/// written by the annotation pass and read-only afterwards.
#[derive(Debug, Clone)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
    candlestick_flags: HashMap<CandlestickPattern, bool>,
    technical_flags: HashMap<Technical, bool>,
}

impl PriceBar {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: i64) -> Self {
        PriceBar {
            date,
            open,
            high,
            low,
            close,
            volume,
            candlestick_flags: HashMap::new(),
            technical_flags: HashMap::new(),
        }
    }

    /// close - open
    pub fn change(&self) -> f64 {
        self.close - self.open
    }

    /// |close - open|
    pub fn body(&self) -> f64 {
        self.change().abs()
    }

    /// min(open, close) - low. Negative on a malformed bar.
    pub fn lower_wick(&self) -> f64 {
        self.open.min(self.close) - self.low
    }

    /// high - max(open, close)
    pub fn upper_wick(&self) -> f64 {
        self.high - self.open.max(self.close)
    }

    /// max(high - low, |high - prev_close|, |low - prev_close|)
    pub fn true_range(&self, prev_close: f64) -> f64 {
        let hl = self.high - self.low;
        let hc = (self.high - prev_close).abs();
        let lc = (self.low - prev_close).abs();
        hl.max(hc).max(lc)
    }

    pub fn candlestick_flag(&self, pattern: CandlestickPattern) -> Option<bool> {
        self.candlestick_flags.get(&pattern).copied()
    }

    pub fn set_candlestick_flag(&mut self, pattern: CandlestickPattern, value: bool) {
        self.candlestick_flags.insert(pattern, value);
    }

    pub fn technical_flag(&self, technical: Technical) -> Option<bool> {
        self.technical_flags.get(&technical).copied()
    }

    pub fn set_technical_flag(&mut self, technical: Technical, value: bool) {
        self.technical_flags.insert(technical, value);
    }
}

/// Ordered bar sequence for one (security, interval) pair.
///
/// Bars are index-addressable: successor/predecessor of bar `i` are `i + 1`
/// and `i - 1`. Trend classifications are cached per lookback window so that
/// aggregation passes with different windows never collide.
#[derive(Debug, Clone, Default)]
pub struct BarSeries {
    bars: Vec<PriceBar>,
    date_index: HashMap<NaiveDate, usize>,
    trends: HashMap<usize, Vec<TrendQualification>>,
}

impl BarSeries {
    /// Build a series from bars already ordered by date.
    pub fn new(bars: Vec<PriceBar>) -> Self {
        let date_index = bars
            .iter()
            .enumerate()
            .map(|(i, bar)| (bar.date, i))
            .collect();
        BarSeries {
            bars,
            date_index,
            trends: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn get(&self, index: usize) -> Option<&PriceBar> {
        self.bars.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut PriceBar> {
        self.bars.get_mut(index)
    }

    pub fn first(&self) -> Option<&PriceBar> {
        self.bars.first()
    }

    pub fn last(&self) -> Option<&PriceBar> {
        self.bars.last()
    }

    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        self.date_index.get(&date).copied()
    }

    pub fn bar_at(&self, date: NaiveDate) -> Option<&PriceBar> {
        self.index_of(date).map(|i| &self.bars[i])
    }

    /// Whether trend classifications are cached for this lookback window.
    pub fn has_trends(&self, bar_count: usize) -> bool {
        self.trends.contains_key(&bar_count)
    }

    /// Cache trend classifications for a lookback window. `trends` must hold
    /// one entry per bar.
    pub fn set_trends(&mut self, bar_count: usize, trends: Vec<TrendQualification>) {
        debug_assert_eq!(trends.len(), self.bars.len());
        self.trends.insert(bar_count, trends);
    }

    pub fn trend_at(&self, bar_count: usize, index: usize) -> Option<TrendQualification> {
        self.trends.get(&bar_count).and_then(|t| t.get(index)).copied()
    }
}
