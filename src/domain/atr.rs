//! Average true range (Wilder smoothing).

use crate::domain::bar::PriceBar;

/// ATR over `period` bars, one entry per input bar. Entries inside the warmup
/// window (and everything when `period` is 0 or exceeds the series length)
/// are `None`. The seed at `period - 1` is the plain average of the first
/// `period` true ranges; later values use Wilder smoothing.
pub fn average_true_range(bars: &[PriceBar], period: usize) -> Vec<Option<f64>> {
    if period == 0 || bars.len() < period {
        return vec![None; bars.len()];
    }

    let mut true_ranges: Vec<f64> = Vec::with_capacity(bars.len());
    for (i, bar) in bars.iter().enumerate() {
        let tr = if i == 0 {
            bar.high - bar.low
        } else {
            bar.true_range(bars[i - 1].close)
        };
        true_ranges.push(tr);
    }

    let mut values: Vec<Option<f64>> = Vec::with_capacity(bars.len());
    let mut prev_atr = 0.0;

    for i in 0..bars.len() {
        if i < period - 1 {
            values.push(None);
        } else if i == period - 1 {
            prev_atr = true_ranges[0..=i].iter().sum::<f64>() / period as f64;
            values.push(Some(prev_atr));
        } else {
            prev_atr = (prev_atr * (period - 1) as f64 + true_ranges[i]) / period as f64;
            values.push(Some(prev_atr));
        }
    }

    values
}
