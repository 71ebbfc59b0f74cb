pub mod append_store;
pub mod store_stats;
pub mod twse;

pub use append_store::{
    classify_shard_text, list_shard_files, shard_numbers, AppendReport, AppendStore, Manifest,
    ParseOutcome,
};
pub use store_stats::{get_store_stats, price_change, StoreStats};
pub use twse::{find_quote, parse_daily_quotes, TwseClient};
