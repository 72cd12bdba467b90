//! Shared networking constants and helpers used by server and viewer.
use std::time::Duration;

/// Default address the dashboard server listens on.
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// Fixed delay applied before every response, modelling a network round trip.
pub const SIMULATED_LATENCY: Duration = Duration::from_millis(120);

/// Period of the simulator tick and of the viewer's data poll.
pub const REFRESH_PERIOD: Duration = Duration::from_secs(1);

