//! Domain types for perpscan

pub mod series;
pub mod signal;
pub mod snapshot;

pub use series::{PriceSeries, HISTORY_LEN};
pub use signal::{Bias, Signal};
pub use snapshot::MarketSnapshot;
