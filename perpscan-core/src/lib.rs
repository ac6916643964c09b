//! perpscan core: per-asset technical analysis for crypto perpetuals.
//!
//! This crate contains the numerical heart of the scanner:
//! - Domain types (market snapshots, price series, signals)
//! - Synthetic price-history generator (the only source of randomness)
//! - Indicator library: RSI, EMA, MACD, Bollinger Bands, ATR
//! - Rule-table scoring engine producing score, bias and labels
//! - Risk sizer producing stop, take-profit ladder and leverage
//! - Ranking of analysed assets by score
//!
//! Everything except the history generator is a pure function of its inputs.

pub mod analysis;
pub mod domain;
pub mod error;
pub mod history;
pub mod indicators;
pub mod ranking;
pub mod rng;
pub mod scoring;
pub mod sizers;

pub use analysis::{analyze, evaluate, passes_volume_filter, Candidate, MIN_VOLUME_24H};
pub use domain::{Bias, MarketSnapshot, PriceSeries, Signal};
pub use error::InvalidInputError;
pub use indicators::IndicatorSet;
pub use ranking::{rank, Ranked};
pub use scoring::score;
pub use sizers::{size, LadderMode, RiskPlan, RiskProfile, TakeProfitLevel};
