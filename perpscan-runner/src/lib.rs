//! perpscan runner: scan orchestration, market data, reports, notifications.
//!
//! This crate builds on `perpscan-core` to provide:
//! - TOML configuration with environment overrides
//! - Market-data providers (Hyperliquid, static/offline)
//! - Parallel scan over the whole perp universe with ranking
//! - Terminal table, JSON and CSV export
//! - Telegram delivery of the ranked candidates

pub mod config;
pub mod market_data;
pub mod report;
pub mod scanner;
pub mod telegram;

pub use config::{
    AccountConfig, ConfigError, MarketDataConfig, ScanConfig, ScanSettings, TelegramConfig,
};
pub use market_data::{
    parse_meta_and_ctxs, HyperliquidProvider, MarketDataError, MarketDataProvider,
    StaticProvider,
};
pub use report::{export_candidates_csv, export_json, import_json, render_table, save_report};
pub use scanner::{run_scan, ScanError, ScanReport, SkippedAsset, SCHEMA_VERSION};
pub use telegram::{format_report, NotifyError, TelegramNotifier};
