use crate::constants::MANIFEST_FILE_NAME;
use crate::services::{classify_shard_text, list_shard_files, shard_numbers, Manifest, ParseOutcome};
use crate::utils::{get_data_dir, series_base_name};
use std::fs;
use std::path::{Path, PathBuf};

pub fn run(ticker: String, data_dir: Option<PathBuf>) {
    println!("🔍 Running health check on the quote store...\n");

    let directory = data_dir.unwrap_or_else(get_data_dir);
    if !directory.exists() {
        eprintln!("❌ Error: data directory {} not found", directory.display());
        std::process::exit(1);
    }

    let base_name = series_base_name(&ticker);
    let files = match list_shard_files(&directory, &base_name) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("❌ Failed to read {}: {}", directory.display(), e);
            std::process::exit(1);
        }
    };

    if files.is_empty() {
        println!("⚠️  No shards found for {} in {}", base_name, directory.display());
        return;
    }

    println!("📋 Scanning {} shard files...\n", files.len());
    let mut issues = 0;

    for name in &files {
        print!("   {} ... ", name);
        match fs::read_to_string(directory.join(name)) {
            Err(e) => {
                println!("UNREADABLE ({})", e);
                issues += 1;
            }
            Ok(text) => match classify_shard_text(&text) {
                ParseOutcome::Records(records) => println!("OK ({} records)", records.len()),
                ParseOutcome::LegacyObject(_) => {
                    println!("LEGACY (single object, upgraded on next write)");
                    issues += 1;
                }
                ParseOutcome::Unparseable => {
                    println!("UNPARSEABLE (content dropped on next write)");
                    issues += 1;
                }
            },
        }
    }

    issues += check_numbering(&directory, &base_name);
    issues += check_manifest(&directory, &files);

    println!("\n{} shard files checked, {} issues found", files.len(), issues);
}

/// Flag gaps in the shard sequence. Shards are never deleted, so any hole
/// means files went missing out-of-band.
fn check_numbering(directory: &Path, base_name: &str) -> usize {
    let numbers = match shard_numbers(directory, base_name) {
        Ok(numbers) => numbers,
        Err(_) => return 0,
    };

    let mut issues = 0;
    if let Some(&max) = numbers.last() {
        for expected in 1..=max {
            if !numbers.contains(&expected) {
                println!("⚠️  Missing shard number {:03}", expected);
                issues += 1;
            }
        }
    }
    issues
}

/// Compare `files.json` against the actual directory listing.
fn check_manifest(directory: &Path, files: &[String]) -> usize {
    let manifest_path = directory.join(MANIFEST_FILE_NAME);
    println!();

    let text = match fs::read_to_string(&manifest_path) {
        Ok(text) => text,
        Err(_) => {
            println!("⚠️  Manifest {} is missing (regenerated on next append)", MANIFEST_FILE_NAME);
            return 1;
        }
    };

    let manifest: Manifest = match serde_json::from_str(&text) {
        Ok(manifest) => manifest,
        Err(e) => {
            println!("⚠️  Manifest {} is unparseable: {}", MANIFEST_FILE_NAME, e);
            return 1;
        }
    };

    if manifest.files == files {
        println!("✅ Manifest matches directory listing");
        return 0;
    }

    let mut issues = 0;
    for name in files {
        if !manifest.files.contains(name) {
            println!("⚠️  {} is on disk but not in the manifest", name);
            issues += 1;
        }
    }
    for name in &manifest.files {
        if !files.contains(name) {
            println!("⚠️  {} is in the manifest but not on disk", name);
            issues += 1;
        }
    }
    if issues == 0 {
        // Same set, wrong order.
        println!("⚠️  Manifest entries are not sorted");
        issues = 1;
    }
    issues
}
