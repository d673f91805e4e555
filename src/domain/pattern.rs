//! Per-bar pattern annotation.
//!
//! A statically enumerated registry of independent rules, each writing
//! boolean flags onto daily bars. Rules are pure functions of a bar and its
//! neighbourhood; one bar's annotation never depends on another bar's
//! annotation outcome.

use crate::domain::atr::average_true_range;
use crate::domain::bar::{BarInterval, PriceBar};
use crate::domain::security::Security;
use crate::ports::config_port::ConfigPort;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandlestickPattern {
    BullishHammer,
}

impl fmt::Display for CandlestickPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandlestickPattern::BullishHammer => write!(f, "bullish hammer"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Technical {
    RisingVolume,
    FallingVolume,
}

impl fmt::Display for Technical {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Technical::RisingVolume => write!(f, "rising volume"),
            Technical::FallingVolume => write!(f, "falling volume"),
        }
    }
}

/// Lower wick must be at least this multiple of the body.
const WICK_TO_BODY_RATIO: f64 = 2.0;
/// Upper wick may be at most this fraction of the body.
const UPPER_WICK_LIMIT: f64 = 0.25;
/// Prior bars that must sit above the candle to establish downtrend context.
const DOWNTREND_LOOKBACK: usize = 3;
/// ATR window for the volatility floor on the lower wick.
const ATR_PERIOD: usize = 14;

pub struct CandlestickRule {
    pub name: &'static str,
    pub pattern: CandlestickPattern,
    pub default_enabled: bool,
    pub detect: fn(bars: &[PriceBar], index: usize, atr: Option<f64>) -> bool,
}

pub struct TechnicalRule {
    pub name: &'static str,
    pub default_enabled: bool,
    pub detect: fn(bars: &[PriceBar], index: usize) -> Vec<(Technical, bool)>,
}

pub const CANDLESTICK_RULES: &[CandlestickRule] = &[CandlestickRule {
    name: "bullish_hammer",
    pattern: CandlestickPattern::BullishHammer,
    default_enabled: true,
    detect: bullish_hammer,
}];

pub const TECHNICAL_RULES: &[TechnicalRule] = &[TechnicalRule {
    name: "volume",
    default_enabled: true,
    detect: volume_trend,
}];

/// Per-rule enable overrides, keyed by rule name. Rules without an override
/// fall back to their registry default.
#[derive(Debug, Clone, Default)]
pub struct AnnotationConfig {
    overrides: HashMap<String, bool>,
}

impl AnnotationConfig {
    /// Read overrides from the `[patterns]` config section, one boolean key
    /// per rule name.
    pub fn from_config(config: &dyn ConfigPort) -> Self {
        let mut overrides = HashMap::new();
        for rule in CANDLESTICK_RULES {
            overrides.insert(
                rule.name.to_string(),
                config.get_bool("patterns", rule.name, rule.default_enabled),
            );
        }
        for rule in TECHNICAL_RULES {
            overrides.insert(
                rule.name.to_string(),
                config.get_bool("patterns", rule.name, rule.default_enabled),
            );
        }
        AnnotationConfig { overrides }
    }

    pub fn set_enabled(&mut self, name: &str, enabled: bool) {
        self.overrides.insert(name.to_string(), enabled);
    }

    pub fn enabled(&self, name: &str, default: bool) -> bool {
        self.overrides.get(name).copied().unwrap_or(default)
    }
}

/// Run every enabled rule over every daily bar of `security`, overwriting
/// prior flag values. Reruns on unchanged data produce identical flags.
pub fn annotate(security: &mut Security, config: &AnnotationConfig) {
    let Some(series) = security.series_mut(BarInterval::Daily) else {
        return;
    };

    let atr = average_true_range(series.bars(), ATR_PERIOD);

    for index in 0..series.len() {
        let mut candlestick_writes = Vec::new();
        for rule in CANDLESTICK_RULES {
            if config.enabled(rule.name, rule.default_enabled) {
                candlestick_writes.push((rule.pattern, (rule.detect)(series.bars(), index, atr[index])));
            }
        }

        let mut technical_writes = Vec::new();
        for rule in TECHNICAL_RULES {
            if config.enabled(rule.name, rule.default_enabled) {
                technical_writes.extend((rule.detect)(series.bars(), index));
            }
        }

        if let Some(bar) = series.get_mut(index) {
            for (pattern, value) in candlestick_writes {
                bar.set_candlestick_flag(pattern, value);
            }
            for (technical, value) in technical_writes {
                bar.set_technical_flag(technical, value);
            }
        }
    }
}

/// Bottom of a downtrend, lower wick dominating the body, closing at or near
/// the high.
fn bullish_hammer(bars: &[PriceBar], index: usize, atr: Option<f64>) -> bool {
    if index < DOWNTREND_LOOKBACK {
        return false;
    }
    let bar = &bars[index];

    // Every recent low must sit above the candle body's floor.
    let prior_min_low = bars[index - DOWNTREND_LOOKBACK..index]
        .iter()
        .map(|b| b.low)
        .fold(f64::INFINITY, f64::min);
    if prior_min_low <= bar.open.min(bar.close) {
        return false;
    }

    let lower_wick = bar.lower_wick();
    let upper_wick = bar.upper_wick();
    let body = bar.body();

    if lower_wick < 0.0 {
        return false;
    }
    // A zero body skips the ratio check; the remaining checks still apply.
    if body > 0.0 && lower_wick / body < WICK_TO_BODY_RATIO {
        return false;
    }
    if lower_wick < atr.unwrap_or(0.0) {
        return false;
    }
    if upper_wick > body * UPPER_WICK_LIMIT {
        return false;
    }

    true
}

/// Strictly rising volume flags RisingVolume, strictly falling flags
/// FallingVolume. The first bar and equal-volume bars get no flag at all.
fn volume_trend(bars: &[PriceBar], index: usize) -> Vec<(Technical, bool)> {
    if index == 0 {
        return Vec::new();
    }
    let prev = &bars[index - 1];
    let bar = &bars[index];

    if bar.volume > prev.volume {
        vec![(Technical::RisingVolume, true)]
    } else if bar.volume < prev.volume {
        vec![(Technical::FallingVolume, true)]
    } else {
        Vec::new()
    }
}
