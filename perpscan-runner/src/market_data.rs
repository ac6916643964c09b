//! Market-data providers.
//!
//! The `MarketDataProvider` trait abstracts over where snapshots come from
//! (the Hyperliquid info endpoint, a JSON file, an in-memory list) so the
//! scanner can be exercised offline and in tests.

use std::path::{Path, PathBuf};
use std::time::Duration;

use perpscan_core::MarketSnapshot;
use serde::Deserialize;
use thiserror::Error;

use crate::config::MarketDataConfig;

#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("provider returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("failed to read snapshots from {path}: {reason}")]
    File { path: PathBuf, reason: String },
}

pub trait MarketDataProvider: Send + Sync {
    /// Fetch the current snapshot of every listed asset.
    fn fetch_snapshots(&self) -> Result<Vec<MarketSnapshot>, MarketDataError>;

    /// Provider name for logs and reports.
    fn name(&self) -> &str;
}

// ─── Hyperliquid ────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct Meta {
    universe: Vec<AssetMeta>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssetMeta {
    name: String,
    #[serde(default)]
    is_delisted: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssetCtx {
    funding: Option<String>,
    prev_day_px: Option<String>,
    day_ntl_vlm: Option<String>,
    mark_px: Option<String>,
}

/// Snapshots from Hyperliquid's `metaAndAssetCtxs` info request.
pub struct HyperliquidProvider {
    client: reqwest::blocking::Client,
    url: String,
}

impl HyperliquidProvider {
    pub fn new(config: &MarketDataConfig) -> Result<Self, MarketDataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| MarketDataError::NetworkUnreachable(e.to_string()))?;
        Ok(Self {
            client,
            url: config.base_url.clone(),
        })
    }
}

impl MarketDataProvider for HyperliquidProvider {
    fn fetch_snapshots(&self) -> Result<Vec<MarketSnapshot>, MarketDataError> {
        let resp = self
            .client
            .post(&self.url)
            .json(&serde_json::json!({ "type": "metaAndAssetCtxs" }))
            .send()
            .map_err(|e| MarketDataError::NetworkUnreachable(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .map_err(|e| MarketDataError::NetworkUnreachable(e.to_string()))?;
        if !status.is_success() {
            return Err(MarketDataError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        parse_meta_and_ctxs(&body)
    }

    fn name(&self) -> &str {
        "hyperliquid"
    }
}

/// Parse a `metaAndAssetCtxs` response body into snapshots.
///
/// The body is `[meta, ctxs]` with `meta.universe[i]` describing `ctxs[i]`.
/// Delisted assets and contexts without a mark price are skipped.
pub fn parse_meta_and_ctxs(body: &str) -> Result<Vec<MarketSnapshot>, MarketDataError> {
    let (meta, ctxs): (Meta, Vec<AssetCtx>) = serde_json::from_str(body)
        .map_err(|e| MarketDataError::ResponseFormatChanged(e.to_string()))?;

    if meta.universe.len() != ctxs.len() {
        return Err(MarketDataError::ResponseFormatChanged(format!(
            "universe has {} assets but {} contexts",
            meta.universe.len(),
            ctxs.len()
        )));
    }

    let mut snapshots = Vec::with_capacity(ctxs.len());
    for (asset, ctx) in meta.universe.into_iter().zip(ctxs) {
        if asset.is_delisted {
            continue;
        }
        let Some(mark) = ctx.mark_px.as_deref() else {
            continue;
        };
        let mark_price = parse_num(&asset.name, "markPx", mark)?;
        let prev_day = opt_num(&asset.name, "prevDayPx", ctx.prev_day_px.as_deref())?;
        let funding = opt_num(&asset.name, "funding", ctx.funding.as_deref())?;
        let volume = opt_num(&asset.name, "dayNtlVlm", ctx.day_ntl_vlm.as_deref())?;

        let momentum_pct = if prev_day > 0.0 {
            (mark_price - prev_day) / prev_day * 100.0
        } else {
            0.0
        };

        snapshots.push(MarketSnapshot::new(
            asset.name,
            mark_price,
            momentum_pct,
            funding * 100.0,
            volume,
        ));
    }
    Ok(snapshots)
}

fn parse_num(symbol: &str, field: &str, raw: &str) -> Result<f64, MarketDataError> {
    raw.trim().parse::<f64>().map_err(|_| {
        MarketDataError::ResponseFormatChanged(format!("{symbol}.{field} is not a number: {raw:?}"))
    })
}

fn opt_num(symbol: &str, field: &str, raw: Option<&str>) -> Result<f64, MarketDataError> {
    raw.map_or(Ok(0.0), |r| parse_num(symbol, field, r))
}

// ─── Offline providers ──────────────────────────────────────────────

/// Fixed list of snapshots, for tests and replays.
pub struct StaticProvider {
    snapshots: Vec<MarketSnapshot>,
}

impl StaticProvider {
    pub fn new(snapshots: Vec<MarketSnapshot>) -> Self {
        Self { snapshots }
    }

    /// Load a JSON array of `MarketSnapshot`s.
    pub fn from_json_file(path: &Path) -> Result<Self, MarketDataError> {
        let file_err = |reason: String| MarketDataError::File {
            path: path.to_path_buf(),
            reason,
        };
        let content = std::fs::read_to_string(path).map_err(|e| file_err(e.to_string()))?;
        let snapshots = serde_json::from_str(&content).map_err(|e| file_err(e.to_string()))?;
        Ok(Self::new(snapshots))
    }
}

impl MarketDataProvider for StaticProvider {
    fn fetch_snapshots(&self) -> Result<Vec<MarketSnapshot>, MarketDataError> {
        Ok(self.snapshots.clone())
    }

    fn name(&self) -> &str {
        "static"
    }
}
