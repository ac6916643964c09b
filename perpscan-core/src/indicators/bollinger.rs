//! Bollinger Bands: SMA of the trailing window +/- a standard deviation multiple.
//!
//! Uses population stddev (divide by N) over the last `period` prices.
//! position = (last - middle) / (2 * stddev), a z-score-like distance that can
//! exceed +/-1. A zero stddev yields position 0.
//! Edge case: fewer than `period` prices → all-zero bands.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bollinger {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
    pub position: f64,
}

pub fn bollinger(prices: &[f64], period: usize, std_mult: f64) -> Bollinger {
    if period == 0 || prices.len() < period {
        return Bollinger::default();
    }

    let window = &prices[prices.len() - period..];
    let middle = window.iter().sum::<f64>() / period as f64;
    let variance = window
        .iter()
        .map(|p| {
            let diff = p - middle;
            diff * diff
        })
        .sum::<f64>()
        / period as f64;
    let std_dev = variance.sqrt();

    let last = window[period - 1];
    let position = if std_dev == 0.0 {
        0.0
    } else {
        (last - middle) / (std_dev * 2.0)
    };

    Bollinger {
        upper: middle + std_mult * std_dev,
        middle,
        lower: middle - std_mult * std_dev,
        position,
    }
}
