//! Scan orchestration: fetch → filter → analyse in parallel → rank.

use chrono::{DateTime, Utc};
use perpscan_core::rng::RngHierarchy;
use perpscan_core::{
    evaluate, passes_volume_filter, rank, Candidate, InvalidInputError, MarketSnapshot,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{ConfigError, ScanConfig};
use crate::market_data::{MarketDataError, MarketDataProvider};

/// Current schema version for persisted scan reports.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("market data error: {0}")]
    MarketData(#[from] MarketDataError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// An asset that reached analysis but was rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedAsset {
    pub symbol: String,
    pub reason: String,
}

/// Outcome of one scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    pub schema_version: u32,
    pub generated_at: DateTime<Utc>,
    pub provider: String,
    /// Master seed when the scan was reproducible.
    pub seed: Option<u64>,
    /// Assets returned by the provider.
    pub universe_size: usize,
    /// Assets dropped by the allow-list or the volume pre-filter.
    pub filtered_out: usize,
    /// Assets that were analysed successfully.
    pub analysed: usize,
    #[serde(default)]
    pub skipped: Vec<SkippedAsset>,
    /// Top candidates, best score first.
    pub candidates: Vec<Candidate>,
}

/// Run a full scan against `provider` using `config`.
///
/// A provider failure aborts the scan. Invalid individual snapshots are
/// logged and listed in `ScanReport::skipped`.
pub fn run_scan(
    provider: &dyn MarketDataProvider,
    config: &ScanConfig,
) -> Result<ScanReport, ScanError> {
    config.validate()?;

    info!(provider = provider.name(), "fetching market snapshots");
    let snapshots = provider.fetch_snapshots()?;
    let universe_size = snapshots.len();

    let eligible = select_eligible(snapshots, &config.scan.symbols);
    let filtered_out = universe_size - eligible.len();
    info!(universe_size, eligible = eligible.len(), filtered_out, "universe filtered");

    let outcomes = analyse_all(&eligible, config);

    let mut candidates = Vec::with_capacity(outcomes.len());
    let mut skipped = Vec::new();
    for (snapshot, outcome) in eligible.iter().zip(outcomes) {
        match outcome {
            Ok(candidate) => candidates.push(candidate),
            Err(e) => {
                warn!(symbol = %snapshot.symbol, error = %e, "skipping asset");
                skipped.push(SkippedAsset {
                    symbol: snapshot.symbol.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }
    let analysed = candidates.len();
    let candidates = rank(candidates, config.scan.top_n);

    info!(
        analysed,
        skipped = skipped.len(),
        reported = candidates.len(),
        "scan complete"
    );

    Ok(ScanReport {
        schema_version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        provider: provider.name().to_string(),
        seed: config.scan.seed,
        universe_size,
        filtered_out,
        analysed,
        skipped,
        candidates,
    })
}

/// Apply the optional allow-list, then the volume pre-filter.
///
/// Allow-list matching is case-insensitive. An empty list admits everything.
pub fn select_eligible(snapshots: Vec<MarketSnapshot>, symbols: &[String]) -> Vec<MarketSnapshot> {
    snapshots
        .into_iter()
        .filter(|s| symbols.is_empty() || symbols.iter().any(|a| a.eq_ignore_ascii_case(&s.symbol)))
        .filter(|s| {
            let keep = passes_volume_filter(s);
            if !keep {
                debug!(symbol = %s.symbol, volume = s.volume_24h, "below volume threshold");
            }
            keep
        })
        .collect()
}

/// Evaluate every snapshot on the rayon pool. Output order matches input.
///
/// With a seed each asset draws from its own stream derived from the symbol,
/// so results do not depend on scheduling.
fn analyse_all(
    snapshots: &[MarketSnapshot],
    config: &ScanConfig,
) -> Vec<Result<Candidate, InvalidInputError>> {
    let balance = config.account.balance;
    let profile = &config.risk;

    match config.scan.seed {
        Some(seed) => {
            let hierarchy = RngHierarchy::new(seed);
            snapshots
                .par_iter()
                .map(|s| {
                    let mut rng = hierarchy.rng_for(&s.symbol);
                    evaluate(s, balance, profile, &mut rng)
                })
                .collect()
        }
        None => snapshots
            .par_iter()
            .map(|s| evaluate(s, balance, profile, &mut rand::thread_rng()))
            .collect(),
    }
}
