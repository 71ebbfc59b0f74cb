use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands;
use crate::constants::{DEFAULT_MAX_SHARD_BYTES, DEFAULT_STOCK_NO};

#[derive(Parser)]
#[command(name = "twsetrack")]
#[command(about = "TWSE daily quote tracker", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch today's quote and append it to the local store
    Pull {
        /// Ticker to track
        #[arg(short, long, default_value = DEFAULT_STOCK_NO)]
        ticker: String,
        /// Output directory for shard files (default: $TWSE_DATA_DIR or data/)
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
        /// Shard rotation threshold in bytes
        #[arg(long, default_value_t = DEFAULT_MAX_SHARD_BYTES)]
        max_shard_bytes: u64,
    },
    /// Show a summary of the stored series
    Status {
        /// Ticker to summarize
        #[arg(short, long, default_value = DEFAULT_STOCK_NO)]
        ticker: String,
        /// Directory holding the shard files
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },
    /// Health-check the stored shards and manifest
    Doctor {
        /// Ticker to check
        #[arg(short, long, default_value = DEFAULT_STOCK_NO)]
        ticker: String,
        /// Directory holding the shard files
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },
}

pub fn run() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Pull {
            ticker,
            data_dir,
            max_shard_bytes,
        } => {
            commands::pull::run(ticker, data_dir, max_shard_bytes);
        }
        Commands::Status { ticker, data_dir } => {
            commands::status::run(ticker, data_dir);
        }
        Commands::Doctor { ticker, data_dir } => {
            commands::doctor::run(ticker, data_dir);
        }
    }
}
