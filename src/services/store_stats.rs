use crate::error::{Error, Result};
use crate::models::QuoteRecord;
use crate::services::append_store::{classify_shard_text, list_shard_files, ParseOutcome};
use std::fs;
use std::path::Path;
use tracing::warn;

/// Summary of one stored series, for the `status` command.
#[derive(Debug, Clone, Default)]
pub struct StoreStats {
    pub shard_count: usize,
    pub record_count: usize,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
    pub latest: Option<QuoteRecord>,
    pub previous: Option<QuoteRecord>,
}

/// Read every shard of a series in shard order and summarize it.
///
/// Shards are loaded with the same tolerance the writer has: a legacy
/// single-object shard counts as one record, an unparseable shard is skipped
/// with a warning.
pub fn get_store_stats(directory: &Path, base_name: &str) -> Result<StoreStats> {
    if !directory.exists() {
        return Ok(StoreStats::default());
    }

    let files = list_shard_files(directory, base_name)?;
    let mut records: Vec<QuoteRecord> = Vec::new();

    for name in &files {
        let path = directory.join(name);
        let text = fs::read_to_string(&path)
            .map_err(|e| Error::Io(format!("Failed to read {}: {}", path.display(), e)))?;

        match classify_shard_text(&text) {
            ParseOutcome::Records(mut shard_records) => records.append(&mut shard_records),
            ParseOutcome::LegacyObject(record) => records.push(*record),
            ParseOutcome::Unparseable => {
                warn!("{}: skipping unparseable shard", path.display());
            }
        }
    }

    Ok(StoreStats {
        shard_count: files.len(),
        record_count: records.len(),
        first_date: records.first().map(|r| r.date.clone()),
        last_date: records.last().map(|r| r.date.clone()),
        previous: records.len().checked_sub(2).map(|i| records[i].clone()),
        latest: records.last().cloned(),
    })
}

/// Day-over-day price change as `(absolute, percent)`.
///
/// Prices are stored as upstream strings; a value that does not parse as a
/// number (the API reports "--" on no-trade days) yields no change.
pub fn price_change(latest: &QuoteRecord, previous: &QuoteRecord) -> Option<(f64, f64)> {
    let current: f64 = latest.price.parse().ok()?;
    let prior: f64 = previous.price.parse().ok()?;
    if prior == 0.0 {
        return None;
    }
    let change = current - prior;
    Some((change, change / prior * 100.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::AppendStore;
    use tempfile::tempdir;

    fn record(date: &str, price: &str) -> QuoteRecord {
        QuoteRecord {
            date: date.to_string(),
            stock_no: "2330".to_string(),
            price: price.to_string(),
        }
    }

    #[test]
    fn test_stats_for_missing_directory() {
        let stats = get_store_stats(Path::new("/nonexistent/twsetrack"), "stock_2330").unwrap();
        assert_eq!(stats.shard_count, 0);
        assert_eq!(stats.record_count, 0);
        assert!(stats.latest.is_none());
    }

    #[test]
    fn test_stats_across_shards() {
        let dir = tempdir().unwrap();
        let store = AppendStore::new(dir.path().to_path_buf(), "stock_2330".to_string(), 96);

        store.append(record("2025-01-02", "1020.00")).unwrap();
        store.append(record("2025-01-03", "1035.00")).unwrap();
        store.append(record("2025-01-06", "1010.00")).unwrap();

        let stats = get_store_stats(dir.path(), "stock_2330").unwrap();
        assert!(stats.shard_count >= 2, "small threshold should have rotated");
        assert_eq!(stats.record_count, 3);
        assert_eq!(stats.first_date.as_deref(), Some("2025-01-02"));
        assert_eq!(stats.last_date.as_deref(), Some("2025-01-06"));
        assert_eq!(stats.latest.as_ref().unwrap().price, "1010.00");
        assert_eq!(stats.previous.as_ref().unwrap().price, "1035.00");
    }

    #[test]
    fn test_stats_count_legacy_shard_as_one_record() {
        let dir = tempdir().unwrap();
        let legacy = serde_json::to_string_pretty(&record("2025-01-02", "1020.00")).unwrap();
        fs::write(dir.path().join("stock_2330_001.json"), legacy).unwrap();

        let stats = get_store_stats(dir.path(), "stock_2330").unwrap();
        assert_eq!(stats.shard_count, 1);
        assert_eq!(stats.record_count, 1);
        assert_eq!(stats.latest.as_ref().unwrap().date, "2025-01-02");
        assert!(stats.previous.is_none());
    }

    #[test]
    fn test_stats_skip_unparseable_shard() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("stock_2330_001.json"), "garbage").unwrap();

        let stats = get_store_stats(dir.path(), "stock_2330").unwrap();
        assert_eq!(stats.shard_count, 1);
        assert_eq!(stats.record_count, 0);
    }

    #[test]
    fn test_price_change() {
        let latest = record("2025-01-03", "1035.00");
        let previous = record("2025-01-02", "1020.00");

        let (change, percent) = price_change(&latest, &previous).unwrap();
        assert!((change - 15.0).abs() < 1e-9);
        assert!((percent - 15.0 / 1020.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_price_change_with_unparseable_price() {
        let latest = record("2025-01-03", "--");
        let previous = record("2025-01-02", "1020.00");
        assert!(price_change(&latest, &previous).is_none());
    }
}
