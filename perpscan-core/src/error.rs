//! Precondition errors for the analysis pipeline.
//!
//! Indicator functions never fail (they return sentinels on short input).
//! These errors are raised before any computation starts, so NaN or
//! non-positive prices never reach the indicator or sizing math.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInputError {
    #[error("{field} is not finite for '{symbol}': {value}")]
    NonFinite {
        symbol: String,
        field: &'static str,
        value: f64,
    },

    #[error("mark price must be > 0 for '{symbol}', got {price}")]
    NonPositivePrice { symbol: String, price: f64 },

    #[error("24h change must be > -100% for '{symbol}', got {change}")]
    ChangeOutOfRange { symbol: String, change: f64 },

    #[error("24h volume must be >= 0 for '{symbol}', got {volume}")]
    NegativeVolume { symbol: String, volume: f64 },

    #[error("account balance must be a positive finite number, got {0}")]
    NonPositiveBalance(f64),

    #[error("risk fraction must be in (0, 1), got {0}")]
    RiskFractionOutOfRange(f64),

    #[error("max leverage must be > 0, got {0}")]
    NonPositiveLeverage(f64),

    #[error("{field} must be > 0, got {value}")]
    NonPositiveRewardRatio { field: &'static str, value: f64 },

    #[error("target reward ratio {target} is below the minimum {min}")]
    TargetBelowMinimum { target: f64, min: f64 },
}

/// Check that `value` is finite, tagging the error with the field name.
pub(crate) fn ensure_finite(
    symbol: &str,
    field: &'static str,
    value: f64,
) -> Result<(), InvalidInputError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(InvalidInputError::NonFinite {
            symbol: symbol.to_string(),
            field,
            value,
        })
    }
}
