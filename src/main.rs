//! Mercado Bitcoin market data - command line entry point
//!
//! This binary provides four subcommands, one per public endpoint:
//! - ticker: 24h summary
//! - orderbook: current bids and asks
//! - trades: trade history (latest, since a trade id, or a time window)
//! - day-summary: aggregated statistics for one day

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

use commands::market::{OutputMode, Request};

#[derive(Parser, Debug)]
#[command(name = "mercadobitcoin")]
#[command(about = "Query the Mercado Bitcoin public market data API", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// API host (overrides MERCADOBITCOIN_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Request timeout in seconds (overrides MERCADOBITCOIN_TIMEOUT_SECS)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Print status and raw body instead of the decoded response
    #[arg(long, global = true)]
    raw: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Summary of the last 24 hours
    Ticker {
        /// Coin symbol, e.g. BTC
        coin: String,
    },

    /// Current order book
    Orderbook {
        /// Coin symbol, e.g. BTC
        coin: String,
    },

    /// Trade history
    Trades {
        /// Coin symbol, e.g. BTC
        coin: String,

        /// Return trades after this trade id (takes precedence over --from/--to)
        #[arg(long)]
        since: Option<u64>,

        /// Window start (Unix seconds)
        #[arg(long)]
        from: Option<i64>,

        /// Window end (Unix seconds), only used together with --from
        #[arg(long)]
        to: Option<i64>,
    },

    /// Daily summary (month and day without leading zeros)
    DaySummary {
        /// Coin symbol, e.g. BTC
        coin: String,
        year: i32,
        month: u32,
        day: u32,
    },
}

fn setup_logging(verbose: bool, command_name: &str) -> Result<()> {
    std::fs::create_dir_all("logs")?;

    // {command}_{date}.log
    let log_filename = format!(
        "{}_{}.log",
        command_name,
        chrono::Local::now().format("%Y-%m-%d_%H-%M-%S")
    );
    let log_path = PathBuf::from("logs").join(&log_filename);

    // Filter out noisy external crates
    let level = if verbose { "debug" } else { "info" };
    let filter_str = format!(
        "{},hyper=warn,hyper_util=warn,reqwest=warn,rustls=warn,h2=warn",
        level
    );
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let file_appender = tracing_appender::rolling::never("logs", &log_filename);

    // Console goes to stderr so stdout carries only the response
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(true);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(file_appender)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    info!("Log file: {}", log_path.display());

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let command_name = match &cli.command {
        Commands::Ticker { .. } => "ticker",
        Commands::Orderbook { .. } => "orderbook",
        Commands::Trades { .. } => "trades",
        Commands::DaySummary { .. } => "day_summary",
    };

    setup_logging(cli.verbose, command_name)?;

    let request = match cli.command {
        Commands::Ticker { coin } => Request::Ticker { coin },
        Commands::Orderbook { coin } => Request::Orderbook { coin },
        Commands::Trades {
            coin,
            since,
            from,
            to,
        } => Request::Trades {
            coin,
            since,
            from,
            to,
        },
        Commands::DaySummary {
            coin,
            year,
            month,
            day,
        } => Request::DaySummary {
            coin,
            year,
            month,
            day,
        },
    };

    let mode = if cli.raw {
        OutputMode::Raw
    } else {
        OutputMode::Decoded
    };

    commands::market::run(request, cli.base_url, cli.timeout, mode)
}
