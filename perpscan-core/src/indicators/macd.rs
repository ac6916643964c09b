//! Moving Average Convergence Divergence (MACD).
//!
//! line = EMA(12) - EMA(26)
//! signal = 0.85 * line (fixed approximation, not an EMA of the line)
//! histogram = line - signal, bullish = line > signal
//! Edge case: fewer than 35 prices → {0, 0, 0, bullish}.

use serde::{Deserialize, Serialize};

use super::ema::ema;

pub const MACD_FAST: usize = 12;
pub const MACD_SLOW: usize = 26;
/// Minimum series length before MACD is computed.
pub const MACD_MIN_LEN: usize = 35;
/// Signal line as a fraction of the MACD line.
pub const SIGNAL_FACTOR: f64 = 0.85;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Macd {
    pub line: f64,
    pub signal: f64,
    pub histogram: f64,
    pub bullish: bool,
}

impl Default for Macd {
    fn default() -> Self {
        Self {
            line: 0.0,
            signal: 0.0,
            histogram: 0.0,
            bullish: true,
        }
    }
}

pub fn macd(prices: &[f64]) -> Macd {
    if prices.len() < MACD_MIN_LEN {
        return Macd::default();
    }

    let line = ema(prices, MACD_FAST) - ema(prices, MACD_SLOW);
    let signal = line * SIGNAL_FACTOR;
    Macd {
        line,
        signal,
        histogram: line - signal,
        bullish: line > signal,
    }
}
