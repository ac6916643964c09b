//! Indicator library.
//!
//! Every indicator is a pure function over a price slice that returns a
//! documented sentinel instead of failing when the slice is too short.
//! `IndicatorSet::compute` runs them all over one synthetic series.

pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;

pub use atr::{atr, true_range};
pub use bollinger::{bollinger, Bollinger};
pub use ema::ema;
pub use macd::{macd, Macd};
pub use rsi::rsi;

use serde::{Deserialize, Serialize};

use crate::domain::PriceSeries;

pub const RSI_PERIOD: usize = 14;
pub const ATR_PERIOD: usize = 14;
pub const BOLLINGER_PERIOD: usize = 20;
pub const BOLLINGER_STD_MULT: f64 = 2.0;
pub const EMA_FAST: usize = 9;
pub const EMA_MID: usize = 21;
pub const EMA_SLOW: usize = 50;

/// All indicator outputs for one asset, derived from a single price series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub rsi: f64,
    pub macd: Macd,
    pub bollinger: Bollinger,
    pub atr: f64,
    /// ATR as a percent of the current price.
    pub atr_pct: f64,
    pub ema9: f64,
    pub ema21: f64,
    pub ema50: f64,
}

impl IndicatorSet {
    /// Compute every indicator over `series`, expressing ATR relative to `price`.
    ///
    /// Highs and lows come from the series' fixed +/-2% spread.
    pub fn compute(series: &PriceSeries, price: f64) -> Self {
        let closes = series.closes();
        let atr = atr(&series.highs(), &series.lows(), closes, ATR_PERIOD);
        let atr_pct = if price > 0.0 { atr / price * 100.0 } else { 0.0 };

        Self {
            rsi: rsi(closes, RSI_PERIOD),
            macd: macd(closes),
            bollinger: bollinger(closes, BOLLINGER_PERIOD, BOLLINGER_STD_MULT),
            atr,
            atr_pct,
            ema9: ema(closes, EMA_FAST),
            ema21: ema(closes, EMA_MID),
            ema50: ema(closes, EMA_SLOW),
        }
    }
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
