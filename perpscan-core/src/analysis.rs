//! Per-asset analysis pipeline.
//!
//! snapshot → validate → synthetic history → indicators → score → risk plan.
//! Each asset is independent; the only shared input is the caller's RNG.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::{MarketSnapshot, Signal};
use crate::error::InvalidInputError;
use crate::history::generate_with_rng;
use crate::indicators::IndicatorSet;
use crate::ranking::Ranked;
use crate::scoring::score;
use crate::sizers::{size, RiskPlan, RiskProfile};

/// Assets trading less than this 24h notional are never scored.
pub const MIN_VOLUME_24H: f64 = 5_000_000.0;

/// A scored signal paired with its sizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub signal: Signal,
    pub plan: RiskPlan,
}

impl Ranked for Candidate {
    fn rank_score(&self) -> i32 {
        self.signal.score
    }
}

pub fn passes_volume_filter(snapshot: &MarketSnapshot) -> bool {
    snapshot.volume_24h >= MIN_VOLUME_24H
}

/// Validate, simulate history, compute indicators and score one asset.
pub fn analyze<R: Rng + ?Sized>(
    snapshot: &MarketSnapshot,
    rng: &mut R,
) -> Result<Signal, InvalidInputError> {
    snapshot.validate()?;
    let series = generate_with_rng(snapshot.mark_price, snapshot.change_24h, rng)?;
    let indicators = IndicatorSet::compute(&series, snapshot.mark_price);
    Ok(score(snapshot, &indicators))
}

/// Analyse one asset and size the resulting signal.
pub fn evaluate<R: Rng + ?Sized>(
    snapshot: &MarketSnapshot,
    balance: f64,
    profile: &RiskProfile,
    rng: &mut R,
) -> Result<Candidate, InvalidInputError> {
    let signal = analyze(snapshot, rng)?;
    let plan = size(&signal, balance, profile)?;
    Ok(Candidate { signal, plan })
}
