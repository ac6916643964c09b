//! Synthetic price-history generator.
//!
//! No historical series is fetched, so a plausible path is simulated from the
//! current price and the 24h change:
//! 1. back-solve the start price `p0 = price / (1 + change / 100)`
//! 2. for 60 steps, push the current value twice, then move toward the
//!    target by `(target - p) / 60` plus uniform noise in +/-1% of `p`
//! 3. never let a step fall below 95% of the pre-step value
//!
//! The generator is stochastic. `generate` draws from the thread RNG, so two
//! calls with identical inputs differ. Pass a seeded RNG to
//! `generate_with_rng` for reproducible output.

use rand::Rng;

use crate::domain::{PriceSeries, HISTORY_LEN};
use crate::error::{ensure_finite, InvalidInputError};

pub const HISTORY_STEPS: usize = HISTORY_LEN / 2;
/// Noise amplitude as a fraction of price (uniform in +/- half of this).
pub const NOISE_FRACTION: f64 = 0.02;
/// Lowest fraction of the pre-step price a step may reach.
pub const STEP_FLOOR: f64 = 0.95;

/// Generate a series using the thread-local RNG.
pub fn generate(current_price: f64, change_24h: f64) -> Result<PriceSeries, InvalidInputError> {
    generate_with_rng(current_price, change_24h, &mut rand::thread_rng())
}

/// Generate a series drawing noise from `rng`.
pub fn generate_with_rng<R: Rng + ?Sized>(
    current_price: f64,
    change_24h: f64,
    rng: &mut R,
) -> Result<PriceSeries, InvalidInputError> {
    ensure_finite("", "current_price", current_price)?;
    ensure_finite("", "change_24h", change_24h)?;
    if current_price <= 0.0 {
        return Err(InvalidInputError::NonPositivePrice {
            symbol: String::new(),
            price: current_price,
        });
    }
    if change_24h <= -100.0 {
        return Err(InvalidInputError::ChangeOutOfRange {
            symbol: String::new(),
            change: change_24h,
        });
    }

    let steps = HISTORY_STEPS as f64;
    let mut price = current_price / (1.0 + change_24h / 100.0);
    let mut closes = Vec::with_capacity(HISTORY_LEN);

    for _ in 0..HISTORY_STEPS {
        closes.push(price);
        closes.push(price);

        let drift = (current_price - price) / steps;
        let noise = (rng.gen::<f64>() - 0.5) * price * NOISE_FRACTION;
        price = (price + drift + noise).max(price * STEP_FLOOR);
    }

    Ok(PriceSeries::new(closes))
}
