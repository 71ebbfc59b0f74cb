use crate::constants::{MANIFEST_FILE_NAME, SHARD_NUMBER_WIDTH};
use crate::error::{Error, Result};
use crate::models::QuoteRecord;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Classification of pre-existing shard content.
///
/// A shard normally holds a JSON array of records. Files written by the first
/// version of the tracker hold a single bare object instead, and a shard may
/// also have been corrupted out-of-band. Prior content is classified once,
/// up front, and each case falls back to a usable sequence instead of
/// aborting the run.
#[derive(Debug)]
pub enum ParseOutcome {
    /// Current format: an array of records
    Records(Vec<QuoteRecord>),
    /// Legacy format: one bare record, upgraded to array form on next write
    LegacyObject(Box<QuoteRecord>),
    /// Neither format; content is dropped on next write
    Unparseable,
}

/// Parse shard text as the current array format, then the legacy
/// single-object format.
pub fn classify_shard_text(text: &str) -> ParseOutcome {
    if let Ok(records) = serde_json::from_str::<Vec<QuoteRecord>>(text) {
        return ParseOutcome::Records(records);
    }
    if let Ok(record) = serde_json::from_str::<QuoteRecord>(text) {
        return ParseOutcome::LegacyObject(Box::new(record));
    }
    ParseOutcome::Unparseable
}

/// Manifest file content: the sorted list of shard filenames for one series.
///
/// The manifest is a derived view. It is regenerated in full from the
/// directory listing after every successful append and is never treated as
/// authoritative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub files: Vec<String>,
}

/// List every `<base_name>_*.json` file in `directory`, sorted ascending.
pub fn list_shard_files(directory: &Path, base_name: &str) -> Result<Vec<String>> {
    let prefix = format!("{}_", base_name);
    let entries = fs::read_dir(directory)
        .map_err(|e| Error::Io(format!("Failed to read {}: {}", directory.display(), e)))?;

    let mut files: Vec<String> = entries
        .filter_map(|e| e.ok())
        .filter_map(|e| e.file_name().to_str().map(|s| s.to_string()))
        .filter(|name| name.starts_with(&prefix) && name.ends_with(".json"))
        .collect();
    files.sort_unstable();
    Ok(files)
}

/// Shard sequence numbers present in `directory` for `base_name`, ascending.
pub fn shard_numbers(directory: &Path, base_name: &str) -> Result<Vec<u32>> {
    let mut numbers: Vec<u32> = list_shard_files(directory, base_name)?
        .iter()
        .filter_map(|name| parse_shard_number(base_name, name))
        .collect();
    numbers.sort_unstable();
    Ok(numbers)
}

/// Extract the sequence number from a shard filename, if it has one.
fn parse_shard_number(base_name: &str, file_name: &str) -> Option<u32> {
    let digits = file_name
        .strip_prefix(base_name)?
        .strip_prefix('_')?
        .strip_suffix(".json")?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Result of a successful append.
#[derive(Debug)]
pub struct AppendReport {
    pub shard_path: PathBuf,
    pub shard_number: u32,
    pub record_count: usize,
    pub rotated: bool,
}

/// Append-only store of quote records, sharded into numbered JSON files.
///
/// One series per ticker: `<base_name>_001.json`, `<base_name>_002.json` and
/// so on, each an indented JSON array. The active shard is always the highest
/// numbered one; once it grows past `max_shard_bytes` the next append starts
/// a fresh shard one number higher. A `files.json` manifest listing every
/// shard is rewritten after each append for downstream readers.
///
/// The store assumes a single writer per directory and series. Appends
/// rewrite the whole shard file, so two concurrent invocations could clobber
/// each other; scheduled runs must not overlap.
pub struct AppendStore {
    directory: PathBuf,
    base_name: String,
    max_shard_bytes: u64,
}

impl AppendStore {
    pub fn new(directory: PathBuf, base_name: String, max_shard_bytes: u64) -> Self {
        Self {
            directory,
            base_name,
            max_shard_bytes,
        }
    }

    /// Persist one record into the active shard.
    ///
    /// Creates the directory on first use, tolerates legacy and unparseable
    /// prior content, rotates to a new shard when the size threshold is
    /// crossed, and regenerates the manifest. Rotation uses one rule on both
    /// sides of the append: a shard whose byte size exceeds `max_shard_bytes`
    /// (on disk before the read, or as serialized output about to be written)
    /// is closed, except that a brand-new shard always accepts its first
    /// record regardless of serialized size.
    pub fn append(&self, record: QuoteRecord) -> Result<AppendReport> {
        fs::create_dir_all(&self.directory).map_err(|e| {
            Error::Io(format!(
                "Failed to create {}: {}",
                self.directory.display(),
                e
            ))
        })?;

        let latest = shard_numbers(&self.directory, &self.base_name)?
            .last()
            .copied();
        let mut shard_number = latest.unwrap_or(1);
        let mut rotated = false;

        // Pre-check: a shard already over the limit is closed without reading it.
        if let Some(n) = latest {
            let on_disk = fs::metadata(self.shard_path(n)).map(|m| m.len()).unwrap_or(0);
            if on_disk > self.max_shard_bytes {
                info!(
                    "{} is {} bytes, over the {} byte limit, rotating to shard {:03}",
                    self.shard_path(n).display(),
                    on_disk,
                    self.max_shard_bytes,
                    n + 1
                );
                shard_number = n + 1;
                rotated = true;
            }
        }

        let active_path = self.shard_path(shard_number);
        let had_file = !rotated && active_path.exists();

        let mut records = if had_file {
            self.load_shard(&active_path)?
        } else {
            Vec::new()
        };
        records.push(record.clone());

        let mut serialized = serde_json::to_string_pretty(&records)?;

        // Post-check: this append must not push a pre-existing shard over the
        // limit. A fresh shard keeps its first record no matter the size.
        if had_file && serialized.len() as u64 > self.max_shard_bytes {
            shard_number += 1;
            rotated = true;
            info!(
                "appending to {} would exceed {} bytes, rotating to shard {:03}",
                active_path.display(),
                self.max_shard_bytes,
                shard_number
            );
            records = vec![record];
            serialized = serde_json::to_string_pretty(&records)?;
        }

        let shard_path = self.shard_path(shard_number);
        fs::write(&shard_path, &serialized).map_err(|e| {
            Error::Io(format!("Failed to write {}: {}", shard_path.display(), e))
        })?;
        debug!(
            "wrote {} ({} records, {} bytes)",
            shard_path.display(),
            records.len(),
            serialized.len()
        );

        // The manifest is a derived view; losing one rewrite does not lose data.
        if let Err(e) = self.write_manifest() {
            warn!("Failed to write manifest: {}", e);
        }

        Ok(AppendReport {
            shard_path,
            shard_number,
            record_count: records.len(),
            rotated,
        })
    }

    /// Read prior shard content, falling back through the legacy and
    /// unparseable cases. Only an unreadable file is fatal.
    fn load_shard(&self, path: &Path) -> Result<Vec<QuoteRecord>> {
        let text = fs::read_to_string(path)
            .map_err(|e| Error::Io(format!("Failed to read {}: {}", path.display(), e)))?;

        Ok(match classify_shard_text(&text) {
            ParseOutcome::Records(records) => records,
            ParseOutcome::LegacyObject(record) => {
                warn!(
                    "{}: legacy single-object shard, upgrading to array form",
                    path.display()
                );
                vec![*record]
            }
            ParseOutcome::Unparseable => {
                warn!(
                    "{}: unparseable shard content, starting an empty sequence",
                    path.display()
                );
                Vec::new()
            }
        })
    }

    /// Rewrite `files.json` from a fresh directory listing.
    fn write_manifest(&self) -> Result<()> {
        let manifest = Manifest {
            files: list_shard_files(&self.directory, &self.base_name)?,
        };
        let text = serde_json::to_string_pretty(&manifest)?;
        let path = self.manifest_path();
        fs::write(&path, text)
            .map_err(|e| Error::Io(format!("Failed to write {}: {}", path.display(), e)))?;
        debug!(
            "wrote {} ({} shards)",
            path.display(),
            manifest.files.len()
        );
        Ok(())
    }

    pub fn shard_path(&self, number: u32) -> PathBuf {
        self.directory.join(format!(
            "{}_{:0width$}.json",
            self.base_name,
            number,
            width = SHARD_NUMBER_WIDTH
        ))
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.directory.join(MANIFEST_FILE_NAME)
    }
}
