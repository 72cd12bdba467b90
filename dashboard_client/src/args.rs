//! Command-line arguments for the dashboard viewer.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::Parser;
use dashboard_common::net::{DEFAULT_BIND, REFRESH_PERIOD};
use std::time::Duration;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Dashboard server address (host:port).
    #[clap(long, default_value = DEFAULT_BIND)]
    pub server: String,

    /// User name to sign in with. Any non-empty name is accepted.
    #[clap(long)]
    pub user: String,

    /// Company id to open; defaults to the first company.
    #[clap(long)]
    pub company: Option<String>,

    /// Account id to watch; defaults to the first account of the company.
    #[clap(long)]
    pub account: Option<String>,

    /// Milliseconds between account data polls.
    #[clap(long, default_value_t = REFRESH_PERIOD.as_millis() as u64)]
    pub poll_ms: u64,
}

impl Args {
    /// Poll period.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_ms)
    }
}
