//! ConvertBot binary
//!
//! One-shot conversion from the command line, or a chat-style REPL
//! reading `/c AMOUNT BASE QUOTE` lines from stdin. Stands in for the
//! chat transport that would normally drive the engine.

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use convertbot::coingecko::CoinGeckoClient;
use convertbot::command::{parse_command, render_reply};
use convertbot::config::AppConfig;
use convertbot::convert::ConversionEngine;
use convertbot::error::ConvertError;

#[derive(Parser, Debug)]
#[command(name = "convertbot", version, about = "Convert an amount of one asset into another")]
struct Cli {
    /// Amount of the base asset to convert
    #[arg(required_unless_present = "repl")]
    amount: Option<f64>,

    /// Base asset ticker (e.g. btc)
    #[arg(required_unless_present = "repl")]
    base: Option<String>,

    /// Quote asset or fiat currency (e.g. usd, sol)
    #[arg(required_unless_present = "repl")]
    quote: Option<String>,

    /// Read /c commands from stdin, one per line
    #[arg(long)]
    repl: bool,
}

/// User-visible text for each failure kind. Transport concern, so it
/// lives here rather than in the engine.
fn user_message(err: &ConvertError) -> String {
    match err {
        ConvertError::UnknownAsset(side) => format!("Unknown {side} asset."),
        ConvertError::PriceUnavailable => "Price unavailable right now.".to_string(),
        ConvertError::LookupFailed(_) | ConvertError::FetchFailed(_) => {
            "Something went wrong, please try again later.".to_string()
        }
    }
}

async fn run_repl(engine: Arc<ConversionEngine>) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut in_flight = Vec::new();
    while let Some(line) = lines.next_line().await? {
        let Some(cmd) = parse_command(&line) else {
            continue;
        };
        // Each request runs as its own task so a slow fetch never
        // blocks unrelated requests.
        let engine = engine.clone();
        in_flight.push(tokio::spawn(async move {
            match engine.convert(cmd.amount, &cmd.base, &cmd.quote).await {
                Ok(result) => println!("{}", render_reply(cmd.amount, &result)),
                Err(err) => {
                    warn!(error = %err, base = %cmd.base, quote = %cmd.quote, "Conversion failed");
                    println!("{}", user_message(&err));
                }
            }
        }));
        in_flight.retain(|handle| !handle.is_finished());
    }
    for handle in in_flight {
        let _ = handle.await;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("convertbot=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load()?;
    info!(config = %config, "Starting ConvertBot");

    let source = Arc::new(CoinGeckoClient::new(
        &config.coingecko.base_url,
        Duration::from_secs(config.coingecko.timeout_secs),
        &config.coingecko.user_agent,
    ));
    let engine = Arc::new(ConversionEngine::new(source, config.cache.policy()));

    if cli.repl {
        return run_repl(engine).await;
    }

    let amount = cli.amount.context("amount is required")?;
    let base = cli.base.context("base ticker is required")?;
    let quote = cli.quote.context("quote ticker is required")?;

    match engine.convert(amount, &base, &quote).await {
        Ok(result) => {
            println!("{}", render_reply(amount, &result));
            Ok(())
        }
        Err(err) => {
            println!("{}", user_message(&err));
            Err(err.into())
        }
    }
}
