//! Poll loop driving the quote table.
//!
//! Polls once immediately, then on every tick of a steady `crossbeam_channel::tick`.
//! A shutdown message (or the sender being dropped) ends the loop without waiting for
//! the next tick.
use crate::fetcher::DashboardApi;
use crate::model::session::Session;
use crate::view::render_table;
use crossbeam_channel::{Receiver, select, tick};
use log::{error, info};
use std::time::Duration;

/// Poll `session`'s selected account every `period` until `shutdown` fires.
///
/// Returns how many polls were attempted.
pub fn poll_until_shutdown(
    session: &mut Session,
    api: &impl DashboardApi,
    account_id: &str,
    period: Duration,
    shutdown: &Receiver<()>,
) -> u32 {
    let ticker = tick(period);
    let mut polls = 0;
    refresh(session, api, account_id, &mut polls);

    loop {
        select! {
            recv(shutdown) -> _ => break,
            recv(ticker) -> _ => refresh(session, api, account_id, &mut polls),
        }
    }
    polls
}

fn refresh(session: &mut Session, api: &impl DashboardApi, account_id: &str, polls: &mut u32) {
    *polls += 1;
    match session.refresh(api) {
        Ok(()) => info!("\n{}", render_table(account_id, session.quotes())),
        Err(e) => error!("Refresh failed, showing last data: {}", e),
    }
}
