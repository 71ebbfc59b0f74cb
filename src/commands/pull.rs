use crate::error::{Error, Result};
use crate::models::QuoteRecord;
use crate::services::{find_quote, AppendReport, AppendStore, TwseClient};
use crate::utils::{get_data_dir, market_date_today, series_base_name};
use std::path::PathBuf;

pub fn run(ticker: String, data_dir: Option<PathBuf>, max_shard_bytes: u64) {
    println!("📥 Fetching TWSE daily quotes for {}...", ticker);

    match fetch_and_append(&ticker, data_dir, max_shard_bytes) {
        Ok(Some(report)) => {
            println!(
                "✅ Appended to {} ({} records{})",
                report.shard_path.display(),
                report.record_count,
                if report.rotated { ", new shard" } else { "" }
            );
        }
        Ok(None) => {
            // Absent ticker is informational, not a failure: the exchange
            // publishes no row for it on non-trading days.
            println!("ℹ️  No quote for {} in today's feed, nothing written", ticker);
        }
        Err(e) => {
            eprintln!("❌ Pull failed: {}", e);
            std::process::exit(1);
        }
    }
}

fn fetch_and_append(
    ticker: &str,
    data_dir: Option<PathBuf>,
    max_shard_bytes: u64,
) -> Result<Option<AppendReport>> {
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| Error::Other(format!("Failed to create Tokio runtime: {}", e)))?;

    let client = TwseClient::new()?;
    let quotes = runtime.block_on(client.fetch_daily_quotes())?;
    println!("   {} quotes downloaded", quotes.len());

    let quote = match find_quote(&quotes, ticker) {
        Some(quote) => quote,
        None => return Ok(None),
    };
    println!(
        "   {} ({}) closed at {}",
        quote.code, quote.name, quote.closing_price
    );

    let record = QuoteRecord::from_quote(quote, market_date_today());
    let directory = data_dir.unwrap_or_else(get_data_dir);
    let store = AppendStore::new(directory, series_base_name(ticker), max_shard_bytes);

    store.append(record).map(Some)
}
