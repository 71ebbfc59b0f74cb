//! Project-wide constants
//!
//! Upstream endpoint, default ticker, and the shard store layout knobs.
//!
//! ## Shard layout
//!
//! One series per ticker, stored as `stock_<ticker>_<NNN>.json` files in the
//! data directory, plus a `files.json` manifest listing every shard. `NNN` is
//! a zero-padded 3-digit sequence starting at 001.

/// TWSE open API endpoint returning the daily quote row for every listed stock
pub const TWSE_STOCK_DAY_ALL_URL: &str =
    "https://openapi.twse.com.tw/v1/exchangeReport/STOCK_DAY_ALL";

/// Ticker tracked by default (2330, TSMC)
pub const DEFAULT_STOCK_NO: &str = "2330";

/// Timezone used to stamp observation dates
pub const MARKET_TIMEZONE: &str = "Asia/Taipei";

/// Rotation threshold for a single shard file (700 MiB)
pub const DEFAULT_MAX_SHARD_BYTES: u64 = 700 * 1024 * 1024;

/// Manifest file listing every shard of a series, consumed by the dashboard
pub const MANIFEST_FILE_NAME: &str = "files.json";

/// Zero-padded width of the shard sequence number
pub const SHARD_NUMBER_WIDTH: usize = 3;

/// Timeout for the upstream fetch, in seconds
pub const FETCH_TIMEOUT_SECS: u64 = 30;
