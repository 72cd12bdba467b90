//! Stock dashboard mock backend.
//!
//! This binary holds a simulated market in memory and serves it to dashboard viewers over
//! HTTP. Internally, it wires together three main building blocks:
//!
//! - `Store` — the company/account directory plus one quote series per (account, ticker),
//!   seeded once at startup and owned behind an `RwLock`.
//! - `Simulator` — the single background thread that takes the write lock once per period
//!   and moves every quote one random-walk step.
//! - `HttpReceiver` + `Router` — accept connections, parse the request path into a `Route`,
//!   read the store under the read lock and answer with JSON after a fixed latency.
//!
//! Concurrency and shutdown:
//! - One writer (the simulator), many readers (one thread per connection).
//! - Ctrl+C, or the listener failing, stops the simulator through its handle; the process
//!   exits afterwards with the listener's error, if any.
//!
//! Endpoints:
//! - `GET /companies` — all companies.
//! - `GET /companies/{companyId}/accounts` — accounts of a company, empty if unknown.
//! - `GET /accounts/{accountId}/data` — `{ "stocks": [...] }`, empty if unknown.
//! - anything else — `404 { "error": "not found" }`.
#![warn(missing_docs)]
use crate::args::Args;
use crate::model::clock::SystemClock;
use crate::model::directory::Directory;
use crate::model::simulator::Simulator;
use crate::model::store::Store;
use crate::query::{QueryService, Router};
use crate::receiver::HttpReceiver;
use clap::Parser;
use crossbeam_channel::{Sender, bounded};
use dashboard_common::{DashboardError, Result};
use log::{error, info};
use std::sync::Arc;
use std::thread;

mod args;
pub mod model;
mod query;
mod receiver;

fn main() -> Result<(), DashboardError> {
    init_logger();
    let args = Args::parse();

    let directory = match &args.directory {
        Some(path) => {
            info!("Loading directory from {}", path.display());
            Directory::load(path)?
        }
        None => Directory::default(),
    };
    let config = args.simulator_config();
    let store = Store::new(directory, &config, Arc::new(SystemClock))?.into_shared();

    let simulator = Simulator::start(Arc::clone(&store), config.tick_interval);

    let router = Arc::new(Router::new(QueryService::new(store), args.latency()));
    let receiver = HttpReceiver::new(&args.bind)?.with_read_timeout(args.read_timeout());
    info!("HTTP socket created on: {}", receiver.local_addr()?);

    let (shutdown_tx, shutdown_rx) = bounded::<Result<()>>(2);
    spawn_reporting(shutdown_tx.clone(), move || receiver.serve(router));
    ctrlc::set_handler(move || {
        info!("Ctrl+C received. Shutting down server...");
        let _ = shutdown_tx.try_send(Ok(()));
    })
    .map_err(|e| DashboardError::Signal(e.to_string()))?;

    let outcome = shutdown_rx.recv().unwrap_or(Ok(()));
    simulator.shutdown();
    outcome
}

/// Run `task` on its own thread and report how it ended on `done`.
///
/// A long-running task that returns at all has stopped serving, so its result is what
/// `main` should exit with.
fn spawn_reporting<F>(done: Sender<Result<()>>, task: F)
where
    F: FnOnce() -> Result<()> + Send + 'static,
{
    thread::spawn(move || {
        let outcome = task();
        if let Err(e) = &outcome {
            error!("Receiver loop failed: {}", e);
        }
        let _ = done.send(outcome);
    });
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
