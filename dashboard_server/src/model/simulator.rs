//! Background tick loop.
//!
//! `Simulator::start` spawns the one thread allowed to mutate the store. It waits on a
//! steady `crossbeam_channel::tick` and takes the write lock once per period to run
//! [`Store::tick`]. A tick is a short in-memory pass, so ticks never overlap.
//!
//! Shutdown: dropping or calling [`SimulatorHandle::shutdown`] disconnects the stop
//! channel; the loop's `select!` sees the disconnect, leaves, and the handle joins the
//! thread. A poisoned lock also ends the loop.
//!
//! [`Store::tick`]: crate::model::store::Store::tick
use crate::model::store::SharedStore;
use crossbeam_channel::{Sender, bounded, select, tick};
use log::{error, info};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Starts the tick thread.
pub struct Simulator;

impl Simulator {
    /// Spawn the tick loop over `store` with the given `period`.
    pub fn start(store: SharedStore, period: Duration) -> SimulatorHandle {
        let (stop_tx, stop_rx) = bounded::<()>(1);

        let thread = thread::spawn(move || {
            let ticker = tick(period);
            info!("Simulator started, period {:?} (Thread ID: {:?})", period, thread::current().id());

            loop {
                select! {
                    recv(stop_rx) -> _ => break,
                    recv(ticker) -> _ => match store.write() {
                        Ok(mut store) => store.tick(),
                        Err(e) => {
                            error!("Store lock poisoned, simulator exiting: {}", e);
                            break;
                        }
                    },
                }
            }
            info!("Simulator stopped");
        });

        SimulatorHandle {
            stop_tx: Some(stop_tx),
            thread: Some(thread),
        }
    }
}

/// Owns the running tick thread; stops it on `shutdown` or drop.
pub struct SimulatorHandle {
    stop_tx: Option<Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl SimulatorHandle {
    /// Stop the tick loop and wait for the thread to exit.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        drop(self.stop_tx.take());
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                error!("Simulator thread panicked");
            }
        }
    }
}

impl Drop for SimulatorHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
