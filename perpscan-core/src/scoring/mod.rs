//! Scoring engine: applies the rule table to one asset.
//!
//! Deterministic: the same snapshot and indicators always yield the same
//! `Signal`. Scores add up across rules and are unbounded in both directions.

pub mod rules;

pub use rules::{Rule, RuleEffect, RuleInput, RULES};

use crate::domain::{Bias, MarketSnapshot, Signal};
use crate::indicators::IndicatorSet;

/// Score an asset from its snapshot and precomputed indicators.
///
/// Bias starts `Neutral` and is overwritten by each rule that sets one, so the
/// last matching override in `RULES` order wins. Labels accumulate in the
/// same order.
pub fn score(snapshot: &MarketSnapshot, indicators: &IndicatorSet) -> Signal {
    let input = RuleInput {
        price: snapshot.mark_price,
        change_24h: snapshot.change_24h,
        funding_rate: snapshot.funding_rate,
        volume_24h: snapshot.volume_24h,
        indicators,
    };

    let mut total = 0;
    let mut bias = Bias::Neutral;
    let mut labels = Vec::new();

    for effect in RULES.iter().filter_map(|rule| rule.evaluate(&input)) {
        total += effect.delta;
        if let Some(label) = effect.label {
            labels.push(label.to_string());
        }
        if let Some(b) = effect.bias {
            bias = b;
        }
    }

    Signal {
        symbol: snapshot.symbol.clone(),
        score: total,
        bias,
        labels,
        price: snapshot.mark_price,
        indicators: *indicators,
        change_24h: snapshot.change_24h,
        funding_rate: snapshot.funding_rate,
        volume_24h: snapshot.volume_24h,
    }
}
