//! Serializable scan configuration.
//!
//! Replaces process-wide settings with one explicit struct passed into the
//! scanner. Loaded from TOML; every section has defaults so an empty file is
//! a valid config.

use std::path::{Path, PathBuf};

use perpscan_core::{InvalidInputError, RiskProfile};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_INFO_URL: &str = "https://api.hyperliquid.xyz/info";
pub const ENV_TELEGRAM_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
pub const ENV_TELEGRAM_CHAT: &str = "TELEGRAM_CHAT_ID";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config TOML: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid risk settings: {0}")]
    Risk(#[from] InvalidInputError),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub account: AccountConfig,
    pub risk: RiskProfile,
    pub scan: ScanSettings,
    pub market_data: MarketDataConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram: Option<TelegramConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountConfig {
    pub balance: f64,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self { balance: 10_000.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanSettings {
    /// Number of candidates kept after ranking.
    pub top_n: usize,
    /// Master seed for reproducible synthetic histories. Unseeded when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Optional allow-list of symbols. Empty means the whole universe.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub symbols: Vec<String>,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            top_n: 10,
            seed: None,
            symbols: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketDataConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_INFO_URL.to_string(),
            timeout_secs: 15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
}

impl ScanConfig {
    /// Load a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Fill Telegram credentials from the environment.
    ///
    /// Environment values win over the file. Both variables must be present
    /// to create a section that the file did not have.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(ENV_TELEGRAM_TOKEN).filter(|v| !v.is_empty());
        let chat = lookup(ENV_TELEGRAM_CHAT).filter(|v| !v.is_empty());

        if let Some(tg) = self.telegram.as_mut() {
            if let Some(t) = token {
                tg.bot_token = t;
            }
            if let Some(c) = chat {
                tg.chat_id = c;
            }
        } else if let (Some(bot_token), Some(chat_id)) = (token, chat) {
            self.telegram = Some(TelegramConfig { bot_token, chat_id });
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.account.balance.is_finite() || self.account.balance <= 0.0 {
            return Err(InvalidInputError::NonPositiveBalance(self.account.balance).into());
        }
        self.risk.validate()?;
        if self.scan.top_n == 0 {
            return Err(ConfigError::Invalid("scan.top_n must be >= 1".into()));
        }
        if self.market_data.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("market_data.base_url is empty".into()));
        }
        if let Some(tg) = &self.telegram {
            if tg.bot_token.is_empty() || tg.chat_id.is_empty() {
                return Err(ConfigError::Invalid(
                    "telegram.bot_token and telegram.chat_id are required".into(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use perpscan_core::LadderMode;
    use std::collections::HashMap;

    #[test]
    fn empty_toml_is_default() {
        let config = ScanConfig::from_toml("").unwrap();
        assert_eq!(config, ScanConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_sections_fill_defaults() {
        let config = ScanConfig::from_toml(
            r#"
[account]
balance = 2500.0

[risk]
risk_fraction = 0.01
min_reward_ratio = 1.5
target_reward_ratio = 2.0
max_leverage = 5.0
ladder = "fixed"

[scan]
top_n = 3
seed = 99
"#,
        )
        .unwrap();

        assert_eq!(config.account.balance, 2500.0);
        assert_eq!(config.risk.ladder, LadderMode::Fixed);
        assert_eq!(config.scan.top_n, 3);
        assert_eq!(config.scan.seed, Some(99));
        assert_eq!(config.market_data, MarketDataConfig::default());
        assert!(config.telegram.is_none());
    }

    #[test]
    fn toml_roundtrip() {
        let mut config = ScanConfig::default();
        config.scan.seed = Some(7);
        config.scan.symbols = vec!["BTC".into(), "ETH".into()];
        config.telegram = Some(TelegramConfig {
            bot_token: "t".into(),
            chat_id: "c".into(),
        });
        let text = config.to_toml().unwrap();
        assert_eq!(ScanConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = ScanConfig::default();
        config.scan.top_n = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = ScanConfig::default();
        config.account.balance = -5.0;
        assert!(matches!(config.validate(), Err(ConfigError::Risk(_))));

        let mut config = ScanConfig::default();
        config.risk.risk_fraction = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Risk(_))));
    }

    #[test]
    fn env_creates_telegram_section() {
        let env: HashMap<&str, &str> =
            [(ENV_TELEGRAM_TOKEN, "tok"), (ENV_TELEGRAM_CHAT, "42")].into();
        let mut config = ScanConfig::default();
        config.apply_env(|k| env.get(k).map(|v| v.to_string()));
        let tg = config.telegram.unwrap();
        assert_eq!(tg.bot_token, "tok");
        assert_eq!(tg.chat_id, "42");
    }

    #[test]
    fn env_needs_both_values_for_new_section() {
        let mut config = ScanConfig::default();
        config.apply_env(|k| (k == ENV_TELEGRAM_TOKEN).then(|| "tok".to_string()));
        assert!(config.telegram.is_none());
    }

    #[test]
    fn env_overrides_file_values() {
        let mut config = ScanConfig::default();
        config.telegram = Some(TelegramConfig {
            bot_token: "file".into(),
            chat_id: "file-chat".into(),
        });
        config.apply_env(|k| (k == ENV_TELEGRAM_TOKEN).then(|| "env".to_string()));
        let tg = config.telegram.unwrap();
        assert_eq!(tg.bot_token, "env");
        assert_eq!(tg.chat_id, "file-chat");
    }
}
