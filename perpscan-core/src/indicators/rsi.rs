//! Relative Strength Index (RSI).
//!
//! Seed: simple average of gains and losses over the first `period` changes.
//! Every later change is folded in with Wilder smoothing:
//! avg = (avg * (period - 1) + new) / period
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Edge cases: fewer than period+1 prices → 50; avg_loss == 0 → 100.

/// Value returned when there are not enough prices to form one change window.
pub const RSI_NEUTRAL: f64 = 50.0;

pub fn rsi(prices: &[f64], period: usize) -> f64 {
    if period == 0 || prices.len() < period + 1 {
        return RSI_NEUTRAL;
    }

    // Seed window is the leading `period` changes; the trailing ones are
    // Wilder-smoothed below.
    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;
    for w in prices[..=period].windows(2) {
        let change = w[1] - w[0];
        if change > 0.0 {
            avg_gain += change;
        } else {
            avg_loss -= change;
        }
    }
    avg_gain /= period as f64;
    avg_loss /= period as f64;

    let p = period as f64;
    for w in prices[period..].windows(2) {
        let change = w[1] - w[0];
        let gain = change.max(0.0);
        let loss = (-change).max(0.0);
        avg_gain = (avg_gain * (p - 1.0) + gain) / p;
        avg_loss = (avg_loss * (p - 1.0) + loss) / p;
    }

    if avg_loss == 0.0 {
        return 100.0;
    }
    100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
}
