use crate::constants::MARKET_TIMEZONE;
use chrono::Utc;
use chrono_tz::Tz;
use std::path::PathBuf;
use tracing::warn;

/// Get quote data directory from environment variable or use default
pub fn get_data_dir() -> PathBuf {
    std::env::var("TWSE_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}

/// Base name of the shard series for a ticker (e.g. `stock_2330`)
pub fn series_base_name(stock_no: &str) -> String {
    format!("stock_{}", stock_no)
}

/// Today's calendar date in the market timezone, formatted `YYYY-MM-DD`.
pub fn market_date_today() -> String {
    let tz: Tz = match MARKET_TIMEZONE.parse() {
        Ok(tz) => tz,
        Err(e) => {
            warn!("Failed to parse timezone '{}': {}", MARKET_TIMEZONE, e);
            chrono_tz::Asia::Taipei
        }
    };

    Utc::now().with_timezone(&tz).format("%Y-%m-%d").to_string()
}
