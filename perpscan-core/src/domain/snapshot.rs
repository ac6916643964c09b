//! MarketSnapshot: the per-asset input to the analysis pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, InvalidInputError};

/// Current market state for one perpetual asset.
///
/// Populated by the market-data collaborator and never mutated afterwards.
/// `funding_rate` is expressed in percent (0.01 = 0.01%), matching the
/// thresholds used by the scoring rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub symbol: String,
    pub mark_price: f64,
    /// 24h percent change used by scoring and the history back-solve.
    pub change_24h: f64,
    pub funding_rate: f64,
    /// 24h notional volume in quote currency.
    pub volume_24h: f64,
    pub momentum_pct: f64,
}

impl MarketSnapshot {
    /// Build a snapshot whose 24h change defaults to the momentum percent.
    pub fn new(
        symbol: impl Into<String>,
        mark_price: f64,
        momentum_pct: f64,
        funding_rate: f64,
        volume_24h: f64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            mark_price,
            change_24h: momentum_pct,
            funding_rate,
            volume_24h,
            momentum_pct,
        }
    }

    /// Replace the 24h change with an externally sourced value.
    pub fn with_change_24h(mut self, change_24h: f64) -> Self {
        self.change_24h = change_24h;
        self
    }

    /// Reject snapshots the pipeline cannot analyse.
    ///
    /// A change of -100% or lower would make the history back-solve divide
    /// by zero (or flip sign), so it is rejected here rather than clamped.
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        let sym = self.symbol.as_str();
        ensure_finite(sym, "mark_price", self.mark_price)?;
        ensure_finite(sym, "change_24h", self.change_24h)?;
        ensure_finite(sym, "funding_rate", self.funding_rate)?;
        ensure_finite(sym, "volume_24h", self.volume_24h)?;
        ensure_finite(sym, "momentum_pct", self.momentum_pct)?;

        if self.mark_price <= 0.0 {
            return Err(InvalidInputError::NonPositivePrice {
                symbol: self.symbol.clone(),
                price: self.mark_price,
            });
        }
        if self.change_24h <= -100.0 {
            return Err(InvalidInputError::ChangeOutOfRange {
                symbol: self.symbol.clone(),
                change: self.change_24h,
            });
        }
        if self.volume_24h < 0.0 {
            return Err(InvalidInputError::NegativeVolume {
                symbol: self.symbol.clone(),
                volume: self.volume_24h,
            });
        }
        Ok(())
    }
}
