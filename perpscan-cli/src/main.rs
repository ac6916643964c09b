//! perpscan CLI: scan, analyze, and config commands.
//!
//! Commands:
//! - `scan`: fetch the perp universe, rank it and print/export the results
//! - `analyze`: score and size a single asset from manually supplied inputs
//! - `config init`: write the default TOML config

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use perpscan_core::rng::RngHierarchy;
use perpscan_core::{
    evaluate, passes_volume_filter, Candidate, MarketSnapshot, RiskProfile, MIN_VOLUME_24H,
};
use perpscan_runner::report::{format_price, save_report};
use perpscan_runner::{
    export_candidates_csv, export_json, render_table, run_scan, HyperliquidProvider,
    MarketDataProvider, ScanConfig, StaticProvider, TelegramNotifier,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "perpscan",
    about = "perpscan: technical-analysis scanner for crypto perpetuals"
)]
struct Cli {
    /// Log filter (e.g. info, debug, perpscan_runner=trace). RUST_LOG wins when set.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan every listed perpetual and print the top candidates.
    Scan {
        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Number of candidates to report.
        #[arg(long)]
        top: Option<usize>,

        /// Account balance used for sizing.
        #[arg(long)]
        balance: Option<f64>,

        /// Fraction of balance risked per trade (e.g. 0.02).
        #[arg(long)]
        risk: Option<f64>,

        /// Master seed for reproducible synthetic history.
        #[arg(long)]
        seed: Option<u64>,

        /// Read snapshots from a JSON file instead of the exchange.
        #[arg(long)]
        snapshots: Option<PathBuf>,

        /// Write the full report as JSON.
        #[arg(long)]
        json: Option<PathBuf>,

        /// Write the candidates as CSV.
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Save a `scan_{timestamp}/` bundle (report.json + candidates.csv) here.
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Send the candidates to the configured Telegram chat.
        #[arg(long, default_value_t = false)]
        telegram: bool,
    },
    /// Analyse a single asset from manually supplied market data.
    Analyze {
        #[arg(long)]
        symbol: String,

        /// Mark price.
        #[arg(long)]
        price: f64,

        /// 24h change in percent.
        #[arg(long, allow_negative_numbers = true)]
        change: f64,

        /// Funding rate in percent.
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        funding: f64,

        /// 24h notional volume.
        #[arg(long, default_value_t = 0.0)]
        volume: f64,

        #[arg(long, default_value_t = 10_000.0)]
        balance: f64,

        #[arg(long)]
        risk: Option<f64>,

        #[arg(long)]
        seed: Option<u64>,

        /// Print the result as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Config file management.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write the default config.
    Init {
        #[arg(long, default_value = "perpscan.toml")]
        path: PathBuf,

        /// Overwrite an existing file.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    match cli.command {
        Commands::Scan {
            config,
            top,
            balance,
            risk,
            seed,
            snapshots,
            json,
            csv,
            out_dir,
            telegram,
        } => run_scan_cmd(ScanArgs {
            config,
            top,
            balance,
            risk,
            seed,
            snapshots,
            json,
            csv,
            out_dir,
            telegram,
        }),
        Commands::Analyze {
            symbol,
            price,
            change,
            funding,
            volume,
            balance,
            risk,
            seed,
            json,
        } => {
            let snapshot = MarketSnapshot::new(symbol, price, change, funding, volume);
            run_analyze_cmd(&snapshot, balance, risk, seed, json)
        }
        Commands::Config { action } => match action {
            ConfigAction::Init { path, force } => run_config_init(&path, force),
        },
    }
}

fn init_tracing(level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => EnvFilter::try_new(level)
            .with_context(|| format!("invalid --log-level '{level}'"))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    Ok(())
}

struct ScanArgs {
    config: Option<PathBuf>,
    top: Option<usize>,
    balance: Option<f64>,
    risk: Option<f64>,
    seed: Option<u64>,
    snapshots: Option<PathBuf>,
    json: Option<PathBuf>,
    csv: Option<PathBuf>,
    out_dir: Option<PathBuf>,
    telegram: bool,
}

fn load_config(args: &ScanArgs) -> Result<ScanConfig> {
    let mut config = match &args.config {
        Some(path) => ScanConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ScanConfig::default(),
    };
    config.apply_env(|key| std::env::var(key).ok());

    if let Some(top) = args.top {
        config.scan.top_n = top;
    }
    if let Some(balance) = args.balance {
        config.account.balance = balance;
    }
    if let Some(risk) = args.risk {
        config.risk.risk_fraction = risk;
    }
    if args.seed.is_some() {
        config.scan.seed = args.seed;
    }
    config.validate()?;
    Ok(config)
}

fn run_scan_cmd(args: ScanArgs) -> Result<()> {
    let config = load_config(&args)?;

    let provider: Box<dyn MarketDataProvider> = match &args.snapshots {
        Some(path) => Box::new(StaticProvider::from_json_file(path)?),
        None => Box::new(HyperliquidProvider::new(&config.market_data)?),
    };

    let report = run_scan(provider.as_ref(), &config)?;
    print!("{}", render_table(&report));

    if let Some(path) = &args.json {
        std::fs::write(path, export_json(&report)?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "report written");
    }
    if let Some(path) = &args.csv {
        std::fs::write(path, export_candidates_csv(&report.candidates)?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "candidates written");
    }
    if let Some(dir) = &args.out_dir {
        let run_dir = save_report(&report, dir)?;
        println!("Report saved to: {}", run_dir.display());
    }

    if args.telegram {
        // A failed delivery does not invalidate the scan
        match &config.telegram {
            Some(tg) => {
                if let Err(e) = TelegramNotifier::new(tg).and_then(|n| n.send_report(&report)) {
                    warn!(error = %e, "telegram delivery failed");
                }
            }
            None => warn!("--telegram given but no telegram credentials configured"),
        }
    }

    Ok(())
}

fn run_analyze_cmd(
    snapshot: &MarketSnapshot,
    balance: f64,
    risk: Option<f64>,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    if !passes_volume_filter(snapshot) {
        warn!(
            symbol = %snapshot.symbol,
            volume = snapshot.volume_24h,
            min = MIN_VOLUME_24H,
            "asset is below the scan volume threshold and would be filtered out of a scan"
        );
    }

    let mut profile = RiskProfile::default();
    if let Some(r) = risk {
        profile.risk_fraction = r;
    }

    let candidate = match seed {
        Some(seed) => {
            let mut rng = RngHierarchy::new(seed).rng_for(&snapshot.symbol);
            evaluate(snapshot, balance, &profile, &mut rng)?
        }
        None => evaluate(snapshot, balance, &profile, &mut rand::thread_rng())?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&candidate)?);
    } else {
        print_candidate(&candidate);
    }
    Ok(())
}

fn print_candidate(c: &Candidate) {
    let (s, p) = (&c.signal, &c.plan);
    let ind = &s.indicators;

    println!("=== {} ===", s.symbol);
    println!("Score:       {}", s.score);
    println!("Bias:        {}", s.bias);
    println!("Signals:     {}", s.labels.join(", "));
    println!();
    println!("Price:       {}", format_price(s.price));
    println!("RSI:         {:.2}", ind.rsi);
    println!(
        "MACD:        {:.6} / {:.6} ({})",
        ind.macd.line,
        ind.macd.signal,
        if ind.macd.bullish { "bullish" } else { "bearish" }
    );
    println!(
        "Bollinger:   {} / {} / {} (pos {:.2})",
        format_price(ind.bollinger.lower),
        format_price(ind.bollinger.middle),
        format_price(ind.bollinger.upper),
        ind.bollinger.position
    );
    println!(
        "EMA 9/21/50: {} / {} / {}",
        format_price(ind.ema9),
        format_price(ind.ema21),
        format_price(ind.ema50)
    );
    println!("ATR:         {} ({:.2}%)", format_price(ind.atr), ind.atr_pct);
    println!();
    println!("Risk:        ${:.2}", p.risk_amount);
    println!(
        "Stop:        {} ({:.2}%)",
        format_price(p.stop_loss_price),
        p.stop_distance_pct
    );
    println!("Position:    ${:.2}", p.position_size);
    println!(
        "Leverage:    {:.2}x (needed {:.2}x)",
        p.leverage_to_use, p.leverage_needed
    );
    for (i, tp) in p.take_profits.iter().enumerate() {
        println!(
            "TP{}:         {} ({:.0}R)",
            i + 1,
            format_price(tp.price),
            tp.reward_ratio
        );
    }
}

fn run_config_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    let toml = ScanConfig::default().to_toml()?;
    std::fs::write(path, toml).with_context(|| format!("failed to write {}", path.display()))?;
    println!("Config written to: {}", path.display());
    Ok(())
}
