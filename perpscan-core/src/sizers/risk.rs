//! ATR-based risk sizer.
//!
//! # Formula
//! ```text
//! risk_amount   = balance * risk_fraction
//! stop_pct      = atr_pct * 1.5        (5% when ATR is unavailable)
//! stop_price    = price * (1 - dir * stop_pct / 100)
//! position_size = risk_amount / (stop_pct / 100)
//! leverage      = min(position_size / balance, max_leverage)
//! target_i      = price * (1 + dir * stop_pct / 100 * ratio_i)
//! ```
//! `dir` is +1 for Bullish and Neutral, -1 for Bearish.
//!
//! # Example
//! - Price 100, ATR 2%, balance 10 000, risk 2%
//! - Stop distance 3% → stop at 97
//! - Position 200 / 0.03 = 6 666.67 → leverage 0.67x

use serde::{Deserialize, Serialize};

use crate::domain::{Bias, Signal};
use crate::error::{ensure_finite, InvalidInputError};

/// Stop distance as a multiple of ATR%.
pub const STOP_ATR_MULTIPLE: f64 = 1.5;
/// Stop distance used when ATR% is zero.
pub const FALLBACK_STOP_PCT: f64 = 5.0;
/// Reward ratios of the fixed ladder variant.
pub const FIXED_LADDER: [f64; 3] = [3.0, 6.0, 9.0];

/// How take-profit reward ratios are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LadderMode {
    /// target, 2 x target, 3 x target
    #[default]
    Scaled,
    /// Always 3, 6, 9
    Fixed,
}

/// Account-level risk configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskProfile {
    /// Fraction of balance risked per trade (e.g. 0.02 = 2%).
    pub risk_fraction: f64,
    pub min_reward_ratio: f64,
    pub target_reward_ratio: f64,
    pub max_leverage: f64,
    pub ladder: LadderMode,
}

impl Default for RiskProfile {
    fn default() -> Self {
        Self {
            risk_fraction: 0.02,
            min_reward_ratio: 2.0,
            target_reward_ratio: 3.0,
            max_leverage: 10.0,
            ladder: LadderMode::Scaled,
        }
    }
}

impl RiskProfile {
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        let rf = self.risk_fraction;
        if !rf.is_finite() || rf <= 0.0 || rf >= 1.0 {
            return Err(InvalidInputError::RiskFractionOutOfRange(rf));
        }
        if !self.max_leverage.is_finite() || self.max_leverage <= 0.0 {
            return Err(InvalidInputError::NonPositiveLeverage(self.max_leverage));
        }
        for (field, value) in [
            ("min_reward_ratio", self.min_reward_ratio),
            ("target_reward_ratio", self.target_reward_ratio),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(InvalidInputError::NonPositiveRewardRatio { field, value });
            }
        }
        if self.target_reward_ratio < self.min_reward_ratio {
            return Err(InvalidInputError::TargetBelowMinimum {
                target: self.target_reward_ratio,
                min: self.min_reward_ratio,
            });
        }
        Ok(())
    }

    /// Reward ratios for the three take-profit levels.
    pub fn ladder_ratios(&self) -> [f64; 3] {
        match self.ladder {
            LadderMode::Scaled => {
                let t = self.target_reward_ratio;
                [t, 2.0 * t, 3.0 * t]
            }
            LadderMode::Fixed => FIXED_LADDER,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TakeProfitLevel {
    pub price: f64,
    pub reward_ratio: f64,
}

/// Sizing outcome for one signal. Derived, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskPlan {
    pub symbol: String,
    pub bias: Bias,
    pub entry_price: f64,
    pub risk_amount: f64,
    pub stop_distance_pct: f64,
    pub stop_loss_price: f64,
    /// Notional position in account currency.
    pub position_size: f64,
    pub leverage_needed: f64,
    /// `leverage_needed` capped at the profile's maximum.
    pub leverage_to_use: f64,
    pub take_profits: Vec<TakeProfitLevel>,
}

/// Size `signal` for an account of `balance` under `profile`.
///
/// Leverage above `max_leverage` is silently capped.
pub fn size(
    signal: &Signal,
    balance: f64,
    profile: &RiskProfile,
) -> Result<RiskPlan, InvalidInputError> {
    if !balance.is_finite() || balance <= 0.0 {
        return Err(InvalidInputError::NonPositiveBalance(balance));
    }
    profile.validate()?;
    ensure_finite(&signal.symbol, "price", signal.price)?;
    if signal.price <= 0.0 {
        return Err(InvalidInputError::NonPositivePrice {
            symbol: signal.symbol.clone(),
            price: signal.price,
        });
    }

    let price = signal.price;
    let dir = signal.bias.direction();
    let atr_pct = signal.indicators.atr_pct;

    let risk_amount = balance * profile.risk_fraction;
    let stop_distance_pct = if atr_pct > 0.0 {
        atr_pct * STOP_ATR_MULTIPLE
    } else {
        FALLBACK_STOP_PCT
    };
    let stop_fraction = stop_distance_pct / 100.0;
    let stop_loss_price = price * (1.0 - dir * stop_fraction);

    let position_size = risk_amount / stop_fraction;
    let leverage_needed = position_size / balance;
    let leverage_to_use = leverage_needed.min(profile.max_leverage);

    let take_profits = profile
        .ladder_ratios()
        .iter()
        .map(|&ratio| TakeProfitLevel {
            price: price * (1.0 + dir * stop_fraction * ratio),
            reward_ratio: ratio,
        })
        .collect();

    Ok(RiskPlan {
        symbol: signal.symbol.clone(),
        bias: signal.bias,
        entry_price: price,
        risk_amount,
        stop_distance_pct,
        stop_loss_price,
        position_size,
        leverage_needed,
        leverage_to_use,
        take_profits,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, Bollinger, IndicatorSet, Macd};

    fn signal(price: f64, atr_pct: f64, bias: Bias) -> Signal {
        Signal {
            symbol: "TEST".into(),
            score: 50,
            bias,
            labels: vec![],
            price,
            indicators: IndicatorSet {
                rsi: 50.0,
                macd: Macd::default(),
                bollinger: Bollinger::default(),
                atr: price * atr_pct / 100.0,
                atr_pct,
                ema9: price,
                ema21: price,
                ema50: price,
            },
            change_24h: 0.0,
            funding_rate: 0.0,
            volume_24h: 1e8,
        }
    }

    #[test]
    fn bullish_worked_example() {
        let plan = size(&signal(100.0, 2.0, Bias::Bullish), 10_000.0, &RiskProfile::default())
            .unwrap();
        assert_approx(plan.risk_amount, 200.0, 1e-9);
        assert_approx(plan.stop_distance_pct, 3.0, 1e-9);
        assert_approx(plan.stop_loss_price, 97.0, 1e-9);
        assert_approx(plan.position_size, 6_666.666_666_67, 1e-6);
        assert_approx(plan.leverage_needed, 0.666_666_666_7, 1e-9);
        assert_approx(plan.leverage_to_use, plan.leverage_needed, 1e-12);

        let prices: Vec<f64> = plan.take_profits.iter().map(|t| t.price).collect();
        assert_approx(prices[0], 109.0, 1e-9);
        assert_approx(prices[1], 118.0, 1e-9);
        assert_approx(prices[2], 127.0, 1e-9);
    }

    #[test]
    fn bearish_flips_offsets() {
        let plan = size(&signal(100.0, 2.0, Bias::Bearish), 10_000.0, &RiskProfile::default())
            .unwrap();
        assert_approx(plan.stop_loss_price, 103.0, 1e-9);
        assert!(plan.take_profits.iter().all(|t| t.price < 100.0));
        assert_approx(plan.take_profits[0].price, 91.0, 1e-9);
    }

    #[test]
    fn neutral_sized_as_bullish() {
        let plan = size(&signal(100.0, 2.0, Bias::Neutral), 10_000.0, &RiskProfile::default())
            .unwrap();
        assert!(plan.stop_loss_price < 100.0);
        assert!(plan.take_profits.iter().all(|t| t.price > 100.0));
    }

    #[test]
    fn zero_atr_uses_fallback_stop() {
        let plan = size(&signal(50.0, 0.0, Bias::Bullish), 1_000.0, &RiskProfile::default())
            .unwrap();
        assert_eq!(plan.stop_distance_pct, FALLBACK_STOP_PCT);
        assert_approx(plan.stop_loss_price, 47.5, 1e-9);
    }

    #[test]
    fn leverage_is_capped() {
        // Tiny stop → huge notional
        let profile = RiskProfile {
            max_leverage: 3.0,
            ..RiskProfile::default()
        };
        let plan = size(&signal(100.0, 0.1, Bias::Bullish), 10_000.0, &profile).unwrap();
        assert!(plan.leverage_needed > 3.0);
        assert_eq!(plan.leverage_to_use, 3.0);
    }

    #[test]
    fn fixed_ladder_ignores_target() {
        let profile = RiskProfile {
            target_reward_ratio: 2.5,
            ladder: LadderMode::Fixed,
            ..RiskProfile::default()
        };
        let plan = size(&signal(100.0, 2.0, Bias::Bullish), 10_000.0, &profile).unwrap();
        let ratios: Vec<f64> = plan.take_profits.iter().map(|t| t.reward_ratio).collect();
        assert_eq!(ratios, vec![3.0, 6.0, 9.0]);
    }

    #[test]
    fn rejects_bad_balance() {
        let sig = signal(100.0, 2.0, Bias::Bullish);
        assert_eq!(
            size(&sig, 0.0, &RiskProfile::default()),
            Err(InvalidInputError::NonPositiveBalance(0.0))
        );
        assert!(size(&sig, f64::NAN, &RiskProfile::default()).is_err());
    }

    #[test]
    fn profile_validation() {
        let mut p = RiskProfile::default();
        assert!(p.validate().is_ok());

        p.risk_fraction = 1.0;
        assert!(matches!(
            p.validate(),
            Err(InvalidInputError::RiskFractionOutOfRange(_))
        ));

        p = RiskProfile {
            max_leverage: 0.0,
            ..RiskProfile::default()
        };
        assert!(matches!(
            p.validate(),
            Err(InvalidInputError::NonPositiveLeverage(_))
        ));

        p = RiskProfile {
            target_reward_ratio: 1.5,
            ..RiskProfile::default()
        };
        assert!(matches!(
            p.validate(),
            Err(InvalidInputError::TargetBelowMinimum { .. })
        ));
    }
}
