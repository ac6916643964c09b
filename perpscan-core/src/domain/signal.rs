//! Signal: the scored, labelled view of one asset.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::indicators::IndicatorSet;

/// Directional lean produced by the scoring rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Bias {
    Bullish,
    Bearish,
    #[default]
    Neutral,
}

impl Bias {
    /// Sign applied to stop and target offsets.
    ///
    /// Neutral is sized like Bullish: stop below entry, targets above.
    pub fn direction(&self) -> f64 {
        match self {
            Bias::Bullish | Bias::Neutral => 1.0,
            Bias::Bearish => -1.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Bias::Bullish => "BULLISH",
            Bias::Bearish => "BEARISH",
            Bias::Neutral => "NEUTRAL",
        }
    }
}

impl fmt::Display for Bias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of the scoring engine for one asset.
///
/// `score` is an unbounded heuristic (nominally about -50..100), not a
/// probability. `labels` keep rule evaluation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub symbol: String,
    pub score: i32,
    pub bias: Bias,
    pub labels: Vec<String>,
    pub price: f64,
    pub indicators: IndicatorSet,
    pub change_24h: f64,
    pub funding_rate: f64,
    pub volume_24h: f64,
}
