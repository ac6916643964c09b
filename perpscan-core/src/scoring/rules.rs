//! The scoring rule table.
//!
//! Each rule is a tagged variant evaluated independently against a
//! `RuleInput`. A rule contributes at most one `RuleEffect`: a score delta,
//! an optional label and an optional bias override. `RULES` fixes the
//! evaluation order; a later bias override replaces an earlier one.

use crate::domain::Bias;
use crate::indicators::IndicatorSet;

pub const RSI_OVERSOLD: f64 = 30.0;
pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const RSI_BULLISH: f64 = 55.0;
pub const RSI_WEAK: f64 = 45.0;
pub const MOMENTUM_THRESHOLD_PCT: f64 = 5.0;
pub const FUNDING_THRESHOLD_PCT: f64 = 0.05;
pub const VOLUME_HIGH: f64 = 50_000_000.0;
pub const VOLUME_MEDIUM: f64 = 20_000_000.0;

/// Market facts a rule may look at.
#[derive(Debug, Clone, Copy)]
pub struct RuleInput<'a> {
    pub price: f64,
    pub change_24h: f64,
    pub funding_rate: f64,
    pub volume_24h: f64,
    pub indicators: &'a IndicatorSet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleEffect {
    pub delta: i32,
    pub label: Option<&'static str>,
    pub bias: Option<Bias>,
}

impl RuleEffect {
    const fn new(delta: i32, label: Option<&'static str>, bias: Option<Bias>) -> Self {
        Self { delta, label, bias }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// RSI zone; first match wins inside the group.
    RsiZone,
    /// MACD line above its signal line.
    MacdCross,
    /// Price position relative to EMA 9/21/50.
    EmaTrend,
    /// 24h change beyond +/-5%.
    Momentum,
    /// Funding beyond +/-0.05%.
    Funding,
    /// Liquidity tier by 24h notional volume.
    Volume,
}

/// Evaluation order of the rule table.
pub const RULES: [Rule; 6] = [
    Rule::RsiZone,
    Rule::MacdCross,
    Rule::EmaTrend,
    Rule::Momentum,
    Rule::Funding,
    Rule::Volume,
];

impl Rule {
    pub fn evaluate(&self, input: &RuleInput<'_>) -> Option<RuleEffect> {
        match self {
            Rule::RsiZone => Some(rsi_zone(input.indicators.rsi)),
            Rule::MacdCross => {
                let macd = &input.indicators.macd;
                if !macd.bullish {
                    None
                } else if macd.histogram > 0.0 {
                    Some(RuleEffect::new(20, Some("MACD Bullish"), None))
                } else {
                    Some(RuleEffect::new(10, Some("MACD Above Signal"), None))
                }
            }
            Rule::EmaTrend => {
                let ind = input.indicators;
                let above = [ind.ema9, ind.ema21, ind.ema50]
                    .iter()
                    .filter(|&&ema| input.price > ema)
                    .count();
                match above {
                    3 => Some(RuleEffect::new(20, Some("Strong Uptrend"), Some(Bias::Bullish))),
                    2 => Some(RuleEffect::new(
                        10,
                        Some("Moderate Uptrend"),
                        Some(Bias::Bullish),
                    )),
                    0 => Some(RuleEffect::new(-20, None, Some(Bias::Bearish))),
                    _ => None,
                }
            }
            Rule::Momentum => {
                if input.change_24h > MOMENTUM_THRESHOLD_PCT {
                    Some(RuleEffect::new(10, Some("Strong Momentum"), None))
                } else if input.change_24h < -MOMENTUM_THRESHOLD_PCT {
                    Some(RuleEffect::new(-10, Some("Weak Momentum"), None))
                } else {
                    None
                }
            }
            Rule::Funding => {
                if input.funding_rate < -FUNDING_THRESHOLD_PCT {
                    Some(RuleEffect::new(10, Some("Negative Funding"), None))
                } else if input.funding_rate > FUNDING_THRESHOLD_PCT {
                    Some(RuleEffect::new(-10, Some("Positive Funding"), None))
                } else {
                    None
                }
            }
            Rule::Volume => {
                let delta = if input.volume_24h > VOLUME_HIGH {
                    15
                } else if input.volume_24h > VOLUME_MEDIUM {
                    10
                } else {
                    5
                };
                Some(RuleEffect::new(delta, None, None))
            }
        }
    }
}

fn rsi_zone(rsi: f64) -> RuleEffect {
    if rsi < RSI_OVERSOLD {
        RuleEffect::new(25, Some("RSI Oversold"), Some(Bias::Bullish))
    } else if rsi > RSI_OVERBOUGHT {
        RuleEffect::new(-15, Some("RSI Overbought"), Some(Bias::Bearish))
    } else if rsi > RSI_BULLISH {
        RuleEffect::new(15, Some("RSI Bullish"), Some(Bias::Bullish))
    } else if rsi < RSI_WEAK {
        RuleEffect::new(-10, Some("RSI Weak"), Some(Bias::Bearish))
    } else {
        RuleEffect::new(5, None, None)
    }
}
