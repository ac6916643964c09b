//! Exponential Moving Average (EMA).
//!
//! Seed: SMA of the first `period` values.
//! Recursive: EMA = value * k + EMA_prev * (1 - k), k = 2 / (period + 1).
//! Edge case: fewer than `period` values → the last value.

pub fn ema(data: &[f64], period: usize) -> f64 {
    let last = data.last().copied().unwrap_or(0.0);
    if period == 0 || data.len() < period {
        return last;
    }

    let k = 2.0 / (period as f64 + 1.0);
    let seed = data[..period].iter().sum::<f64>() / period as f64;

    data[period..]
        .iter()
        .fold(seed, |prev, &value| value * k + prev * (1.0 - k))
}
