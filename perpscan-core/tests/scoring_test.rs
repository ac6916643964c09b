//! Integration tests for the scoring rule table.
//!
//! Indicator sets are built by hand so the stochastic history generator is
//! bypassed and every expected score can be worked out from the table.

use perpscan_core::indicators::{Bollinger, IndicatorSet, Macd};
use perpscan_core::{score, Bias, MarketSnapshot};

// ──────────────────────────────────────────────
// Helpers
// ──────────────────────────────────────────────

fn labels(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn bullish_macd(histogram: f64) -> Macd {
    Macd {
        line: histogram / 0.15,
        signal: histogram / 0.15 * 0.85,
        histogram,
        bullish: true,
    }
}

fn bearish_macd() -> Macd {
    Macd {
        line: -1.0,
        signal: -0.85,
        histogram: -0.15,
        bullish: false,
    }
}

fn indicators(rsi: f64, macd: Macd, emas: [f64; 3]) -> IndicatorSet {
    IndicatorSet {
        rsi,
        macd,
        bollinger: Bollinger::default(),
        atr: 2.0,
        atr_pct: 2.0,
        ema9: emas[0],
        ema21: emas[1],
        ema50: emas[2],
    }
}

// ──────────────────────────────────────────────
// Worked examples
// ──────────────────────────────────────────────

#[test]
fn full_house_scores_100() {
    let snap = MarketSnapshot::new("BTC", 100.0, 7.0, -0.08, 60_000_000.0);
    let ind = indicators(25.0, bullish_macd(0.5), [95.0, 90.0, 85.0]);

    let sig = score(&snap, &ind);

    assert_eq!(sig.score, 100);
    assert_eq!(sig.bias, Bias::Bullish);
    assert_eq!(
        sig.labels,
        labels(&[
            "RSI Oversold",
            "MACD Bullish",
            "Strong Uptrend",
            "Strong Momentum",
            "Negative Funding",
        ])
    );
}

#[test]
fn overbought_downtrend_scores_negative() {
    // -15 (overbought) - 20 (below all EMAs) - 10 (weak momentum)
    // - 10 (positive funding) + 5 (low volume) = -50
    let snap = MarketSnapshot::new("DOGE", 100.0, -8.0, 0.2, 6_000_000.0);
    let ind = indicators(80.0, bearish_macd(), [110.0, 120.0, 130.0]);

    let sig = score(&snap, &ind);

    assert_eq!(sig.score, -50);
    assert_eq!(sig.bias, Bias::Bearish);
    assert_eq!(
        sig.labels,
        labels(&["RSI Overbought", "Weak Momentum", "Positive Funding"])
    );
}

#[test]
fn moderate_uptrend_overrides_weak_rsi() {
    // RSI 40 sets Bearish first; the EMA rule runs later and sets Bullish
    let snap = MarketSnapshot::new("SOL", 100.0, 0.0, 0.0, 30_000_000.0);
    let ind = indicators(40.0, bearish_macd(), [99.0, 98.0, 101.0]);

    let sig = score(&snap, &ind);

    assert_eq!(sig.score, -10 + 10 + 10);
    assert_eq!(sig.bias, Bias::Bullish);
    assert_eq!(sig.labels, labels(&["RSI Weak", "Moderate Uptrend"]));
}

#[test]
fn rsi_bullish_with_macd_above_signal() {
    // Default MACD (short series) is bullish with zero histogram
    let snap = MarketSnapshot::new("ARB", 1.0, 2.0, 0.0, 25_000_000.0);
    let ind = indicators(60.0, Macd::default(), [1.1, 0.9, 1.2]);

    let sig = score(&snap, &ind);

    assert_eq!(sig.score, 15 + 10 + 10);
    assert_eq!(sig.bias, Bias::Bullish);
    assert_eq!(sig.labels, labels(&["RSI Bullish", "MACD Above Signal"]));
}

#[test]
fn one_ema_below_price_leaves_bias_alone() {
    let snap = MarketSnapshot::new("LINK", 100.0, 0.0, 0.0, 10_000_000.0);
    let ind = indicators(50.0, bearish_macd(), [99.0, 101.0, 102.0]);

    let sig = score(&snap, &ind);

    assert_eq!(sig.score, 10);
    assert_eq!(sig.bias, Bias::Neutral);
    assert!(sig.labels.is_empty());
}

// ──────────────────────────────────────────────
// Determinism
// ──────────────────────────────────────────────

#[test]
fn score_is_deterministic() {
    let snap = MarketSnapshot::new("ETH", 3_000.0, 4.0, -0.02, 800_000_000.0);
    let ind = indicators(52.0, bullish_macd(1.2), [2_990.0, 3_010.0, 2_900.0]);

    let first = score(&snap, &ind);
    for _ in 0..10 {
        assert_eq!(score(&snap, &ind), first);
    }
}
