//! Average True Range (ATR).
//!
//! True Range: max(high-low, |high-prev_close|, |low-prev_close|)
//! Seed: mean of the first `period` true ranges (starting at index 1, the
//! first point with a previous close), then Wilder smoothing.
//! Edge case: fewer than period+1 points → 0.

/// Compute the True Range series. TR[0] has no previous close and is `high - low`.
pub fn true_range(highs: &[f64], lows: &[f64], closes: &[f64]) -> Vec<f64> {
    let n = highs.len().min(lows.len()).min(closes.len());
    (0..n)
        .map(|i| {
            let (h, l) = (highs[i], lows[i]);
            if i == 0 {
                h - l
            } else {
                let pc = closes[i - 1];
                (h - l).max((h - pc).abs()).max((l - pc).abs())
            }
        })
        .collect()
}

pub fn atr(highs: &[f64], lows: &[f64], closes: &[f64], period: usize) -> f64 {
    let tr = true_range(highs, lows, closes);
    if period == 0 || tr.len() < period + 1 {
        return 0.0;
    }

    let p = period as f64;
    let seed = tr[1..=period].iter().sum::<f64>() / p;
    tr[period + 1..]
        .iter()
        .fold(seed, |prev, &value| (prev * (p - 1.0) + value) / p)
}
