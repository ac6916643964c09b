//! Property tests for indicator and sizing invariants.
//!
//! Uses proptest to verify:
//! 1. RSI stays within [0, 100] and short input returns the neutral sentinel
//! 2. EMA of a constant series is that constant
//! 3. Leverage never exceeds the profile cap
//! 4. Stop and targets sit on the side implied by bias
//! 5. Generated history respects the per-step floor

use perpscan_core::history::{generate_with_rng, STEP_FLOOR};
use perpscan_core::indicators::{ema, rsi, Bollinger, IndicatorSet, Macd};
use perpscan_core::{size, Bias, RiskProfile, Signal};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_prices(min_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(1.0..10_000.0_f64, min_len..200)
}

fn arb_bias() -> impl Strategy<Value = Bias> {
    prop_oneof![Just(Bias::Bullish), Just(Bias::Bearish), Just(Bias::Neutral)]
}

fn signal(price: f64, atr_pct: f64, bias: Bias) -> Signal {
    Signal {
        symbol: "PROP".into(),
        score: 0,
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
        volume_24h: 1e7,
    }
}

// ── Indicators ───────────────────────────────────────────────────────

proptest! {
    #[test]
    fn rsi_within_bounds(prices in arb_prices(15)) {
        let v = rsi(&prices, 14);
        prop_assert!((0.0..=100.0).contains(&v), "RSI = {}", v);
    }

    #[test]
    fn rsi_short_input_is_fifty(prices in prop::collection::vec(1.0..100.0_f64, 0..15)) {
        prop_assert_eq!(rsi(&prices, 14), 50.0);
    }

    #[test]
    fn ema_of_constant_is_constant(value in 0.01..1e6_f64, len in 1usize..120, period in 1usize..120) {
        let data = vec![value; len];
        let result = ema(&data, period);
        prop_assert!((result - value).abs() <= value * 1e-12, "ema = {}, value = {}", result, value);
    }
}

// ── Risk sizing ──────────────────────────────────────────────────────

proptest! {
    #[test]
    fn leverage_never_exceeds_cap(
        price in 0.001..100_000.0_f64,
        atr_pct in 0.0..50.0_f64,
        balance in 10.0..1e7_f64,
        risk_fraction in 0.001..0.2_f64,
        max_leverage in 0.5..100.0_f64,
        bias in arb_bias(),
    ) {
        let profile = RiskProfile { risk_fraction, max_leverage, ..RiskProfile::default() };
        let plan = size(&signal(price, atr_pct, bias), balance, &profile).unwrap();
        prop_assert!(plan.leverage_to_use <= max_leverage);
        prop_assert!(plan.leverage_to_use <= plan.leverage_needed + 1e-12);
    }

    #[test]
    fn stop_and_targets_follow_bias(
        price in 0.01..100_000.0_f64,
        atr_pct in 0.01..20.0_f64,
        bias in arb_bias(),
    ) {
        let plan = size(&signal(price, atr_pct, bias), 10_000.0, &RiskProfile::default()).unwrap();
        if bias == Bias::Bearish {
            prop_assert!(plan.stop_loss_price > price);
            prop_assert!(plan.take_profits.iter().all(|t| t.price < price));
        } else {
            prop_assert!(plan.stop_loss_price < price);
            prop_assert!(plan.take_profits.iter().all(|t| t.price > price));
        }
        let ratios: Vec<f64> = plan.take_profits.iter().map(|t| t.reward_ratio).collect();
        prop_assert!(ratios.windows(2).all(|w| w[0] < w[1]));
    }
}

// ── History generator ────────────────────────────────────────────────

proptest! {
    #[test]
    fn history_respects_floor(
        price in 0.0001..1e6_f64,
        change in -99.0..500.0_f64,
        seed in any::<u64>(),
    ) {
        let series = generate_with_rng(price, change, &mut StdRng::seed_from_u64(seed)).unwrap();
        prop_assert_eq!(series.len(), 120);
        let steps: Vec<f64> = series.closes().iter().step_by(2).copied().collect();
        for w in steps.windows(2) {
            prop_assert!(w[1] > 0.0);
            prop_assert!(w[1] >= w[0] * STEP_FLOOR * (1.0 - 1e-12));
        }
    }
}
