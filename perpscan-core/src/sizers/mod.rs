//! Risk sizing: turns a scored signal into an executable plan.
//!
//! Sizers translate an account balance and a risk budget into a notional
//! position, a stop, a take-profit ladder and a leverage recommendation.
//! They are signal-agnostic: only price, ATR% and bias are read.

pub mod risk;

pub use risk::{size, LadderMode, RiskPlan, RiskProfile, TakeProfitLevel};
