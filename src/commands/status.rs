use crate::error::Result;
use crate::services::{get_store_stats, price_change};
use crate::utils::{get_data_dir, series_base_name};
use std::path::PathBuf;

pub fn run(ticker: String, data_dir: Option<PathBuf>) {
    println!("📊 Quote store status for {}\n", ticker);

    match show_status(&ticker, data_dir) {
        Ok(()) => {}
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn show_status(ticker: &str, data_dir: Option<PathBuf>) -> Result<()> {
    let directory = data_dir.unwrap_or_else(get_data_dir);
    let base_name = series_base_name(ticker);
    let stats = get_store_stats(&directory, &base_name)?;

    if stats.record_count == 0 {
        println!("⚠️  No data stored yet. Run 'pull' first.");
        return Ok(());
    }

    println!(
        "🔹 {} shards, {} records in {}",
        stats.shard_count,
        format_number(stats.record_count),
        directory.display()
    );

    if let (Some(first), Some(last)) = (&stats.first_date, &stats.last_date) {
        println!("   Range:  {} → {}", first, last);
    }

    if let Some(latest) = &stats.latest {
        println!("   Latest: {} on {}", latest.price, latest.date);

        if let Some(previous) = &stats.previous {
            if let Some((change, percent)) = price_change(latest, previous) {
                let trend = if change >= 0.0 { "📈" } else { "📉" };
                println!("   Change: {} {:+.2} ({:+.2}%)", trend, change, percent);
            }
        }
    }

    Ok(())
}

fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}
