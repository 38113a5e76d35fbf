//! Broadcast newly listed properties from a scraper CSV to a LINE channel.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use bukken_broadcast::{
    build_header, chunk_lines, filter_and_format, jst_now, read_listings, BroadcastConfig,
    Broadcaster, Listing,
};

#[derive(Parser, Debug)]
#[command(name = "bukken-broadcast", version, about = "Broadcast newly listed properties to a LINE channel")]
struct Args {
    /// Input CSV written by the listing scraper
    #[arg(long, default_value = "new_items.csv")]
    input: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = BroadcastConfig::from_env().context("Failed to load broadcast configuration")?;

    let listings = read_listings(&args.input)
        .with_context(|| format!("Failed to read listings from {}", args.input.display()))?;
    info!(
        "loaded {} listings from {}",
        listings.len(),
        args.input.display()
    );

    let lines = filter_and_format(&listings, Listing::matches_price_tier);
    if lines.is_empty() {
        println!("no listings to deliver");
        return Ok(());
    }

    let header = build_header(jst_now());
    let chunks = chunk_lines(&lines, &header, config.max_message_len);
    info!(
        "broadcasting {} listings in {} messages",
        lines.len(),
        chunks.len()
    );

    let broadcaster = Broadcaster::new(&config).context("Failed to build broadcast client")?;
    broadcaster
        .broadcast_all(&chunks)
        .await
        .context("Broadcast delivery failed")?;

    println!("delivered listings={} messages={}", lines.len(), chunks.len());
    Ok(())
}
