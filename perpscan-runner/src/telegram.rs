//! Telegram notifications for scan results.
//!
//! Messages use HTML parse mode. Long reports are split on candidate
//! boundaries so that no message exceeds the Bot API length limit.

use std::time::Duration;

use perpscan_core::{Bias, Candidate};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::TelegramConfig;
use crate::report::{format_price, format_volume};
use crate::scanner::ScanReport;

pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";
/// Bot API hard limit on message text length.
pub const MAX_MESSAGE_LEN: usize = 4096;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("telegram request failed: {0}")]
    Transport(String),
    #[error("telegram API returned HTTP {status}: {body}")]
    Api { status: u16, body: String },
}

/// Blocking Telegram Bot API client.
pub struct TelegramNotifier {
    client: reqwest::blocking::Client,
    api_base: String,
    bot_token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(config: &TelegramConfig) -> Result<Self, NotifyError> {
        Self::with_api_base(config, TELEGRAM_API_BASE)
    }

    /// Point the notifier at a different Bot API host.
    pub fn with_api_base(config: &TelegramConfig, api_base: &str) -> Result<Self, NotifyError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| NotifyError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            bot_token: config.bot_token.clone(),
            chat_id: config.chat_id.clone(),
        })
    }

    pub fn send_message(&self, text: &str) -> Result<(), NotifyError> {
        let url = format!("{}/bot{}/sendMessage", self.api_base, self.bot_token);
        let payload = json!({
            "chat_id": self.chat_id,
            "text": text,
            "parse_mode": "HTML",
            "disable_web_page_preview": true,
        });

        let resp = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .map_err(|e| NotifyError::Transport(e.without_url().to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(NotifyError::Api {
                status: status.as_u16(),
                body,
            });
        }
        debug!(len = text.len(), "telegram message delivered");
        Ok(())
    }

    /// Send every chunk of the formatted report. Stops at the first failure.
    pub fn send_report(&self, report: &ScanReport) -> Result<usize, NotifyError> {
        let messages = format_report(report);
        for msg in &messages {
            self.send_message(msg)?;
        }
        info!(messages = messages.len(), "scan report sent to telegram");
        Ok(messages.len())
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn bias_marker(bias: Bias) -> &'static str {
    match bias {
        Bias::Bullish => "🟢",
        Bias::Bearish => "🔴",
        Bias::Neutral => "⚪",
    }
}

/// One HTML block describing a ranked candidate.
pub fn format_candidate(rank: usize, c: &Candidate) -> String {
    let (s, p) = (&c.signal, &c.plan);
    let targets = p
        .take_profits
        .iter()
        .map(|tp| format!("{} ({:.0}R)", format_price(tp.price), tp.reward_ratio))
        .collect::<Vec<_>>()
        .join(" / ");

    let mut block = format!(
        "{} <b>#{} {}</b> | score {} | {}\n\
         Price: <code>{}</code> ({:+.2}% 24h)\n\
         Stop: <code>{}</code> ({:.2}%)\n\
         Targets: <code>{}</code>\n\
         Size: ${:.0} | Leverage: {:.1}x\n\
         RSI {:.1} | Funding {:.4}% | Vol {}\n",
        bias_marker(s.bias),
        rank,
        escape_html(&s.symbol),
        s.score,
        s.bias.as_str(),
        format_price(s.price),
        s.change_24h,
        format_price(p.stop_loss_price),
        p.stop_distance_pct,
        targets,
        p.position_size,
        p.leverage_to_use,
        s.indicators.rsi,
        s.funding_rate,
        format_volume(s.volume_24h),
    );
    if !s.labels.is_empty() {
        block.push_str(&format!("<i>{}</i>\n", escape_html(&s.labels.join(", "))));
    }
    block
}

/// Format a report as one or more messages, each within [`MAX_MESSAGE_LEN`].
pub fn format_report(report: &ScanReport) -> Vec<String> {
    let header = format!(
        "<b>📊 Perp scan</b> {}\nAnalysed {} of {} assets\n\n",
        report.generated_at.format("%Y-%m-%d %H:%M UTC"),
        report.analysed,
        report.universe_size,
    );
    if report.candidates.is_empty() {
        return vec![format!("{header}No candidates.")];
    }

    let mut messages = Vec::new();
    let mut current = header;
    for (i, c) in report.candidates.iter().enumerate() {
        let block = format_candidate(i + 1, c);
        if !current.is_empty() && current.len() + block.len() + 1 > MAX_MESSAGE_LEN {
            messages.push(std::mem::take(&mut current));
        }
        current.push_str(&block);
        current.push('\n');
    }
    if !current.is_empty() {
        messages.push(current);
    }
    messages
}
