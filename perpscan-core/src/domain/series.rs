//! PriceSeries: synthetic close series plus its derived high/low bands.

use serde::{Deserialize, Serialize};

/// Number of points produced by the history generator (60 steps x 2 pushes).
pub const HISTORY_LEN: usize = 120;

/// Fixed spread used to derive synthetic highs and lows from closes.
pub const HIGH_FACTOR: f64 = 1.02;
pub const LOW_FACTOR: f64 = 0.98;

/// Ordered price path for a single asset.
///
/// Regenerated for every analysis and never shared between assets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    closes: Vec<f64>,
}

impl PriceSeries {
    pub fn new(closes: Vec<f64>) -> Self {
        Self { closes }
    }

    pub fn closes(&self) -> &[f64] {
        &self.closes
    }

    /// Synthetic highs: `close * 1.02`.
    pub fn highs(&self) -> Vec<f64> {
        self.closes.iter().map(|p| p * HIGH_FACTOR).collect()
    }

    /// Synthetic lows: `close * 0.98`.
    pub fn lows(&self) -> Vec<f64> {
        self.closes.iter().map(|p| p * LOW_FACTOR).collect()
    }

    pub fn last(&self) -> Option<f64> {
        self.closes.last().copied()
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }
}

impl From<Vec<f64>> for PriceSeries {
    fn from(closes: Vec<f64>) -> Self {
        Self::new(closes)
    }
}
