use std::process::exit;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use btc_tracker::cli::{Cli, Commands, OutputFormat};
use btc_tracker::config::{ApplyArgs, TrackerConfig, load_configuration, tracker_config};
use btc_tracker::http::{BlockchainApiClient, PriceFeedClient};
use btc_tracker::log::{init_logging, mask_string};
use btc_tracker::report::render_rate;
use btc_tracker::tracker::{SessionEvent, TrackSession, WalletTracker};
use clap::Parser;
use log::{error, info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use url::Url;

const LOOKUP_FAILED_TEXT: &str = "Invalid Bitcoin address or API error!";

type Tracker = WalletTracker<BlockchainApiClient, PriceFeedClient>;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    init_logging()?;
    let cli = Cli::parse();

    let config = load_configuration(&cli.config.config_file)?;
    let mut settings = tracker_config(&config)?;
    settings.apply_config_args(&cli.config);

    match cli.command {
        Commands::Lookup { address, output } => {
            settings.apply_output(&output);
            let tracker = build_tracker(&settings)?;
            info!(address:% = mask_string(&address); "Looking up address");

            match tracker.lookup(&address).await {
                Ok(report) => {
                    println!("{}", report.render(output.format)?);
                    Ok(())
                },
                Err(e) => {
                    error!(address:% = mask_string(&address), error:% = e; "Lookup failed");
                    eprintln!("{}", LOOKUP_FAILED_TEXT);
                    exit(1);
                },
            }
        },
        Commands::Price => {
            let tracker = build_tracker(&settings)?;
            let rate = tracker.fetch_rate().await?;
            println!("{}", render_rate(rate, tracker.currency(), OutputFormat::Text)?);
            Ok(())
        },
        Commands::Track { output } => {
            settings.apply_output(&output);
            let tracker = Arc::new(build_tracker(&settings)?);
            track(tracker, output.format).await
        },
    }
}

fn build_tracker(config: &TrackerConfig) -> Result<Tracker, anyhow::Error> {
    let timeout = Duration::from_secs(config.timeout_secs);

    let api_url = Url::parse(&config.api_base_url)
        .with_context(|| format!("Invalid blockchain API URL: {}", config.api_base_url))?;
    let price_url = Url::parse(&config.price_feed_url)
        .with_context(|| format!("Invalid price feed URL: {}", config.price_feed_url))?;

    let address_source = BlockchainApiClient::with_config(api_url, config.api_token.clone(), config.max_retries, timeout)?;
    let rate_source = PriceFeedClient::with_config(price_url, &config.fiat_currency, config.max_retries, timeout)?;

    Ok(WalletTracker::new(
        address_source,
        rate_source,
        &config.fiat_currency,
        config.display_limit,
    ))
}

/// Look up every address read from stdin until it closes.
async fn track(tracker: Arc<Tracker>, format: OutputFormat) -> Result<(), anyhow::Error> {
    let (events_tx, mut events_rx) = mpsc::channel(16);
    let mut session = TrackSession::new(tracker, events_tx);

    if let Err(e) = session.prefetch_rate().await {
        warn!(error:% = e; "Could not fetch BTC price, will retry on the next lookup");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line.context("Could not read from stdin")? {
                    Some(line) if line.trim().is_empty() => continue,
                    Some(line) => session.submit(line.trim().to_string()),
                    None => break,
                }
            }
            Some(event) = events_rx.recv() => print_event(event, format)?,
        }
    }

    session.finish().await;
    while let Ok(event) = events_rx.try_recv() {
        print_event(event, format)?;
    }
    Ok(())
}

fn print_event(event: SessionEvent, format: OutputFormat) -> Result<(), anyhow::Error> {
    match event {
        SessionEvent::Report(report) => println!("{}", report.render(format)?),
        SessionEvent::Failed { address, error } => {
            error!(address:% = mask_string(&address), error:% = error; "Lookup failed");
            eprintln!("{}", LOOKUP_FAILED_TEXT);
        },
    }
    Ok(())
}
