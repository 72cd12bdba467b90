//! Command-line arguments for the dashboard server.
use crate::model::store::SimulatorConfig;
use clap::Parser;
use dashboard_common::net::{DEFAULT_BIND, REFRESH_PERIOD, SIMULATED_LATENCY};
use std::path::PathBuf;
use std::time::Duration;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Address to listen on for HTTP requests.
    #[clap(long, default_value = DEFAULT_BIND)]
    pub bind: String,

    /// Seed prices are drawn from [base, 2 * base). Must be positive.
    #[clap(long, default_value_t = 100.0)]
    pub base_price: f64,

    /// Milliseconds between simulator ticks.
    #[clap(long, default_value_t = REFRESH_PERIOD.as_millis() as u64)]
    pub tick_ms: u64,

    /// Fixed delay in milliseconds applied before every response.
    #[clap(long, default_value_t = SIMULATED_LATENCY.as_millis() as u64)]
    pub latency_ms: u64,

    /// Milliseconds a connection may take to send its request head.
    #[clap(long, default_value_t = 5000)]
    pub read_timeout_ms: u64,

    /// RNG seed for a reproducible simulation.
    #[clap(long)]
    pub seed: Option<u64>,

    /// JSON file with companies and accounts, replacing the built-in directory.
    #[clap(long)]
    pub directory: Option<PathBuf>,
}

impl Args {
    /// Simulation parameters; validated when the store is built.
    pub fn simulator_config(&self) -> SimulatorConfig {
        SimulatorConfig {
            base_price: self.base_price,
            tick_interval: Duration::from_millis(self.tick_ms),
            seed: self.seed,
        }
    }

    /// Per-connection read timeout.
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    /// Response latency.
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}
