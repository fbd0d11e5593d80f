//! Command-line configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use newsreel::store::{StoreConfig, DEFAULT_PAGE_SIZE};

/// Feed used when neither `--endpoint` nor `NEWSREEL_ENDPOINT` is set.
pub const DEFAULT_ENDPOINT: &str = "https://mocki.io/v1/52930ca2-656e-4c3c-9eab-8ad842fe0cc4";

#[derive(Debug, Parser)]
#[command(name = "newsreel")]
#[command(about = "Browse a news feed in the terminal, one page at a time")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Config {
    /// JSON endpoint serving the article collection
    #[arg(long, env = "NEWSREEL_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Articles per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE, value_parser = parse_page_size)]
    pub page_size: usize,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Write logs to this file (filtered by RUST_LOG, default `newsreel=info`)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            page_size: self.page_size,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn parse_page_size(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("page size must be at least 1".into()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}
