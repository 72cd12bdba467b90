//! Dashboard Viewer — a terminal client that signs in, picks a company and account, and
//! polls the dashboard server once per second, printing the refreshed quote table.
//!
//! Usage example (CLI):
//! ```bash
//! dashboard_client --server 127.0.0.1:8080 --user dana --company c1
//! ```
//!
//! Without `--company` the first company is opened; without `--account` the first account
//! of that company is watched. A failed poll is logged and the last table stays current.
#![warn(missing_docs)]
mod args;
mod fetcher;
mod model;
mod poller;
mod view;

use crate::args::Args;
use crate::fetcher::HttpApi;
use crate::model::session::{Mode, Session};
use crate::poller::poll_until_shutdown;
use clap::Parser;
use crossbeam_channel::bounded;
use dashboard_common::{DashboardError, Result};
use log::{info, warn};

fn main() -> Result<(), DashboardError> {
    init_logger();
    let args = Args::parse();
    let (shutdown_tx, shutdown_rx) = bounded::<()>(1);
    ctrlc::set_handler(move || {
        info!("Ctrl+C received. Shutting down viewer...");
        let _ = shutdown_tx.try_send(());
    })
    .map_err(|e| DashboardError::Signal(e.to_string()))?;

    let api = HttpApi::new(&args.server)?;
    let mut session = Session::default();
    session.login(&args.user)?;
    session.load_companies(&api)?;

    let company_id = match args.company.as_deref() {
        Some(id) => id.to_string(),
        None => match session.companies().first() {
            Some(company) => company.id.clone(),
            None => {
                warn!("Server returned no companies");
                return Ok(());
            }
        },
    };
    session.select_company(&api, &company_id)?;
    if let Some(account_id) = args.account.as_deref() {
        session.select_account(account_id);
    }

    let Some(account_id) = session.selected_account().map(str::to_string) else {
        warn!("Company {} has no accounts to watch", company_id);
        return Ok(());
    };

    info!(
        "Watching account {} ({} accounts in company {})",
        account_id,
        session.accounts().len(),
        session.selected_company().unwrap_or_default()
    );
    info!("Viewer is running. Press Ctrl+C to exit.");
    let polls = poll_until_shutdown(
        &mut session,
        &api,
        &account_id,
        args.poll_interval(),
        &shutdown_rx,
    );
    info!("Stopped after {} polls", polls);

    if let Mode::LoggedIn { user } = session.mode() {
        info!("Signing out {}", user);
    }
    session.logout();
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
