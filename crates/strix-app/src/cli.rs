use std::path::PathBuf;

use clap::Parser;

/// Strix, a multi-tab browser shell.
#[derive(Parser, Debug)]
#[command(name = "strix", version, about)]
pub struct Args {
    /// URLs to open at startup, one tab each. Defaults to the configured homepage.
    pub urls: Vec<String>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Run without a window and exit once every tab has loaded.
    #[arg(long)]
    pub headless: bool,

    /// Write a PNG of the active tab to this path before exiting (headless only).
    #[arg(long)]
    pub screenshot: Option<PathBuf>,

    /// Page-load wait timeout override in milliseconds.
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

pub fn parse() -> Args {
    Args::parse()
}
